use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the status row (bottom of screen): message on the left, key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let hint = if app.controller.is_open() {
        "\u{2191}\u{2193} select  Tab/Enter insert  Esc close"
    } else {
        "@ mention  Ctrl-Q quit"
    };
    let message = app.status.as_deref().unwrap_or("");
    let message = truncate_to_width(message, width.saturating_sub(display_width(hint) + 2));

    let mut spans = vec![Span::styled(
        message.clone(),
        Style::default().fg(app.theme.text).bg(bg),
    )];
    let used = display_width(&message) + display_width(hint);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn message_and_hint() {
        let mut app = sample_app();
        app.status = Some("3 user(s) loaded".into());
        let output = render_to_string(60, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.starts_with("3 user(s) loaded"));
        assert!(output.ends_with("@ mention  Ctrl-Q quit"));
    }

    #[test]
    fn hint_switches_while_open() {
        let mut app = sample_app();
        app.insert_str("@");
        let output = render_to_string(60, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.ends_with("Esc close"), "{output}");
    }
}
