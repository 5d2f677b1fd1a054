use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::to_cells;

/// Render the text buffer, keeping the caret line in view.
/// The mention being completed is highlighted while the dropdown is open.
pub fn render_editor(frame: &mut Frame, app: &mut App, area: Rect) {
    app.editor_area = area;
    let height = area.height.max(1) as usize;
    let (caret_line, caret_col) = app.caret_position();

    if caret_line < app.scroll_line {
        app.scroll_line = caret_line;
    } else if caret_line >= app.scroll_line + height {
        app.scroll_line = caret_line + 1 - height;
    }

    let base = Style::default().fg(app.theme.text).bg(app.theme.background);
    let mention = Style::default()
        .fg(app.theme.highlight)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    let active = app
        .controller
        .open_state()
        .map(|open| (open.token().start, open.token().end()));

    let mut lines: Vec<Line> = Vec::new();
    let mut line_start = 0;
    for (i, text) in app.buffer.split('\n').enumerate() {
        let line_end = line_start + text.len();
        if i >= app.scroll_line && i < app.scroll_line + height {
            let line = match active {
                Some((s, e)) if s >= line_start && e <= line_end => Line::from(vec![
                    Span::styled(text[..s - line_start].to_string(), base),
                    Span::styled(text[s - line_start..e - line_start].to_string(), mention),
                    Span::styled(text[e - line_start..].to_string(), base),
                ]),
                _ => Line::from(Span::styled(text.to_string(), base)),
            };
            lines.push(line);
        }
        line_start = line_end + 1;
    }

    frame.render_widget(Paragraph::new(lines).style(base), area);

    let x = area
        .x
        .saturating_add(to_cells(caret_col).min(area.width.saturating_sub(1)));
    let y = area.y.saturating_add(to_cells(caret_line - app.scroll_line));
    frame.set_cursor_position(Position::new(x, y));
}
