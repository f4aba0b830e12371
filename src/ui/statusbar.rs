use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    entries: &[(String, &str)],
    shown: usize,
    total: usize,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let mut spans = Vec::new();
    for (key, desc) in entries {
        spans.extend(pill_spans(key, desc, theme));
    }
    spans.push(Span::styled(
        format!("  {shown}/{total} shown"),
        Style::default().fg(theme.text_secondary),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {desc}"), Style::default().fg(theme.pill_desc_fg)),
    ]
}
