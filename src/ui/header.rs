use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::format_kb;
use crate::system::snapshot::{MetricsSnapshot, SortKey};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &MetricsSnapshot,
    sort_key: SortKey,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(area);

    render_branding(frame, chunks[0], snapshot, sort_key, theme);
    render_cpu_gauge(frame, chunks[1], snapshot, theme);
    render_mem_gauge(frame, chunks[2], snapshot, theme);
}

fn bordered(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
}

fn titled(theme: &Theme, title: &'static str) -> Block<'static> {
    bordered(theme).title(Span::styled(
        title,
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    snapshot: &MetricsSnapshot,
    sort_key: SortKey,
    theme: &Theme,
) {
    let block = bordered(theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(
            " ticktop ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("Sort: {}", sort_key.label()),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Procs: {}", snapshot.processes.len()),
            Style::default().fg(theme.text_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_cpu_gauge(frame: &mut Frame, area: Rect, snapshot: &MetricsSnapshot, theme: &Theme) {
    let ratio = (snapshot.total_cpu_percent / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(titled(theme, " CPU "))
        .gauge_style(
            Style::default()
                .fg(theme.heat(snapshot.total_cpu_percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(format!("{:.2}%", snapshot.total_cpu_percent));
    frame.render_widget(gauge, area);
}

fn render_mem_gauge(frame: &mut Frame, area: Rect, snapshot: &MetricsSnapshot, theme: &Theme) {
    let ratio = (snapshot.total_mem_percent / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(titled(theme, " MEM "))
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(format!(
            "{}/{} ({:.2}%)",
            format_kb(snapshot.mem_used_kb),
            format_kb(snapshot.mem_total_kb),
            snapshot.total_mem_percent
        ));
    frame.render_widget(gauge, area);
}
