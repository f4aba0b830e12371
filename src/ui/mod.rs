pub mod header;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw<S>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], &app.snapshot, app.sort_key, &app.theme);

    let rows = app.visible_rows();
    process_table::render(
        frame,
        chunks[1],
        rows,
        app.sort_key,
        app.name_width,
        &app.theme,
    );

    statusbar::render(
        frame,
        chunks[2],
        &app.keybinds.help_entries(),
        rows.len(),
        app.snapshot.processes.len(),
        &app.theme,
    );
}

#[cfg(test)]
mod tests;
