pub mod autocomplete;
pub mod editor;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: editor, status row, then the dropdown on top
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: editor | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    editor::render_editor(frame, app, chunks[0]);
    status_row::render_status_row(frame, app, chunks[1]);

    // Cleared every frame; set again only while the dropdown is drawn
    app.popup_area = None;
    if app.controller.is_open() {
        autocomplete::render_autocomplete(frame, app, chunks[0]);
    }
}
