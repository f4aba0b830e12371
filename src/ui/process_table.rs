use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use crate::format::truncate_unicode;
use crate::system::snapshot::{ProcessMetrics, SortKey};
use crate::ui::theme::Theme;

const HEADERS: [&str; 5] = ["PID", "NAME", "CPU%", "MEM%", "RSS(kB)"];

pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[ProcessMetrics],
    sort_key: SortKey,
    name_width: usize,
    theme: &Theme,
) {
    let header = Row::new(HEADERS.iter().map(|h| {
        let active = matches!(
            (*h, sort_key),
            ("CPU%", SortKey::Cpu) | ("MEM%", SortKey::Memory)
        );
        let mut style = Style::default()
            .fg(theme.table_header_fg)
            .add_modifier(Modifier::BOLD);
        if active {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(*h).style(style)
    }));

    let name_width = name_width.clamp(4, 200);
    let body = rows.iter().map(|p| {
        Row::new(vec![
            Cell::from(p.pid.to_string()),
            Cell::from(truncate_unicode(&p.name, name_width)),
            Cell::from(format!("{:.2}", p.cpu_percent))
                .style(Style::default().fg(theme.heat(p.cpu_percent))),
            Cell::from(format!("{:.2}", p.mem_percent))
                .style(Style::default().fg(theme.heat(p.mem_percent))),
            Cell::from(p.resident_kb.to_string()),
        ])
        .style(Style::default().fg(theme.text_primary))
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(name_width as u16 + 2),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(body, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.overlay_border))
            .title(Span::styled(
                " Processes ",
                Style::default()
                    .fg(theme.text_secondary)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(table, area);
}
