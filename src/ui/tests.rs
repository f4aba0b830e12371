use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::app::{App, ResolvedKeybinds};
use crate::config::KeybindsConfig;
use crate::system::sampler::Sampler;
use crate::system::snapshot::{MetricsSnapshot, ProcessMetrics, SortKey};
use crate::ui::theme::Theme;
use crate::ui::{header, process_table, statusbar};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn make_row(pid: u32, name: &str, cpu: f64, mem: f64, rss: u64) -> ProcessMetrics {
    ProcessMetrics {
        pid,
        name: name.to_string(),
        cpu_percent: cpu,
        mem_percent: mem,
        resident_kb: rss,
    }
}

fn make_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        total_cpu_percent: 50.0,
        total_mem_percent: 25.0,
        mem_total_kb: 16_000_000,
        mem_used_kb: 4_000_000,
        sort_key: SortKey::Cpu,
        processes: vec![
            make_row(7, "worker", 20.0, 2.0, 320_000),
            make_row(1, "init", 0.5, 0.1, 12_000),
            make_row(
                99,
                "a-process-name-that-is-far-too-long",
                0.0,
                0.0,
                100,
            ),
        ],
    }
}

fn make_app(max_rows: usize) -> App<()> {
    App {
        running: true,
        sampler: Sampler::new(()),
        snapshot: make_snapshot(),
        sort_key: SortKey::Cpu,
        keybinds: ResolvedKeybinds::from_config(&KeybindsConfig::default()),
        theme: Theme::dark(),
        max_rows,
        name_width: 22,
        ticks: 2,
    }
}

#[test]
fn header_shows_totals_and_sort() {
    let snapshot = make_snapshot();
    let output = render_to_string(120, 3, |frame| {
        header::render(
            frame,
            Rect::new(0, 0, 120, 3),
            &snapshot,
            SortKey::Memory,
            &Theme::dark(),
        );
    });

    assert!(output.contains("ticktop"));
    assert!(output.contains("Sort: MEM"));
    assert!(output.contains("Procs: 3"));
    assert!(output.contains("50.00%"));
    assert!(output.contains("(25.00%)"));
}

#[test]
fn table_truncates_long_names() {
    let snapshot = make_snapshot();
    let output = render_to_string(80, 8, |frame| {
        process_table::render(
            frame,
            Rect::new(0, 0, 80, 8),
            &snapshot.processes,
            SortKey::Cpu,
            22,
            &Theme::dark(),
        );
    });

    assert!(output.contains("PID"));
    assert!(output.contains("RSS(kB)"));
    assert!(output.contains("worker"));
    assert!(output.contains("20.00"));
    assert!(output.contains("320000"));
    assert!(output.contains("a-process-name-that-i\u{2026}"));
    assert!(!output.contains("far-too-long"));
}

#[test]
fn zero_name_width_uses_minimum_column() {
    let snapshot = make_snapshot();
    let output = render_to_string(80, 8, |frame| {
        process_table::render(
            frame,
            Rect::new(0, 0, 80, 8),
            &snapshot.processes,
            SortKey::Cpu,
            0,
            &Theme::dark(),
        );
    });

    assert!(output.contains("wor\u{2026}"));
    assert!(output.contains("a-p\u{2026}"));
    assert!(!output.contains("work"));
}

#[test]
fn statusbar_lists_keybinds_and_page_size() {
    let entries = ResolvedKeybinds::from_config(&KeybindsConfig::default()).help_entries();
    let output = render_to_string(80, 1, |frame| {
        statusbar::render(
            frame,
            Rect::new(0, 0, 80, 1),
            &entries,
            2,
            3,
            &Theme::dark(),
        );
    });

    assert_eq!(
        output.trim_end(),
        "  c  CPU sort  m  MEM sort  q  Quit  2/3 shown"
    );
}

#[test]
fn draw_paginates_to_max_rows() {
    let app = make_app(2);
    let output = render_to_string(100, 20, |frame| crate::ui::draw(frame, &app));

    assert!(output.contains("worker"));
    assert!(output.contains("init"));
    assert!(!output.contains("a-process-name"));
    assert!(output.contains("2/3 shown"));
}

#[test]
fn draw_survives_tiny_terminal() {
    let app = make_app(30);
    let _ = render_to_string(10, 4, |frame| crate::ui::draw(frame, &app));
}
