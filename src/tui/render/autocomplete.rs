use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::{display_width, to_cells, truncate_to_width};

/// Render the mention dropdown hanging from the trigger character
pub fn render_autocomplete(frame: &mut Frame, app: &mut App, editor_area: Rect) {
    let Some(open) = app.controller.open_state() else {
        return;
    };
    let anchor = open.anchor();
    let max_visible = app.config.ui.max_visible.max(1);
    let labels: Vec<String> = open.ranked().iter().map(|c| c.label()).collect();
    let selected = open.selected();

    let bg = app.theme.background;
    let count = labels.len().min(max_visible);
    let term_area = frame.area();

    // Widest entry plus marker and borders
    let widest = labels.iter().map(|l| display_width(l)).max().unwrap_or(10) + 5;
    let popup_w = to_cells(widest).min(term_area.width).max(12.min(term_area.width));
    let popup_h = to_cells(count).saturating_add(2);

    // Below the trigger line if it fits, otherwise above it
    let line_y = editor_area
        .y
        .saturating_add(to_cells(anchor.line.saturating_sub(app.scroll_line)));
    let y = if line_y.saturating_add(1).saturating_add(popup_h) <= term_area.height {
        line_y + 1
    } else {
        line_y.saturating_sub(popup_h)
    };
    let x = editor_area
        .x
        .saturating_add(to_cells(anchor.column))
        .min(term_area.width.saturating_sub(popup_w));
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(term_area);

    // Scroll window around selected item
    let scroll_start = if selected >= max_visible {
        selected - max_visible + 1
    } else {
        0
    };

    let label_w = (popup_w as usize).saturating_sub(5);
    let mut lines: Vec<Line> = Vec::new();
    for (i, label) in labels.iter().enumerate().skip(scroll_start).take(max_visible) {
        let is_selected = i == selected;
        let style = if is_selected {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };

        let prefix = if is_selected { " \u{25B8} " } else { "   " };
        let label = truncate_to_width(label, label_w);
        let pad = label_w.saturating_sub(display_width(&label));
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{}{}", label, " ".repeat(pad)), style),
        ]));
    }

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);

    app.popup_area = Some(popup_area);
    app.popup_scroll = scroll_start;
}

#[cfg(test)]
mod tests {
    use crate::engine::Key;
    use crate::tui::render::render;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn dropdown_lists_matches_below_trigger() {
        let mut app = sample_app();
        app.insert_str("hey @al");
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        let rows: Vec<&str> = output.lines().collect();
        assert_eq!(rows[0], "hey @al");
        assert!(rows[2].contains("\u{25B8} Alice (@alice)"), "{output}");
        assert!(rows[3].contains("Albert (@albert)"), "{output}");
        assert!(!output.contains("Bob"));

        let area = app.popup_area.unwrap();
        assert_eq!((area.x, area.y, area.height), (4, 1, 4));
    }

    #[test]
    fn selection_marker_follows_cursor() {
        let mut app = sample_app();
        app.insert_str("@al");
        app.controller.on_key(Key::Down);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert!(output.contains("\u{25B8} Albert (@albert)"), "{output}");
        assert!(!output.contains("\u{25B8} Alice"));
    }

    #[test]
    fn long_lists_scroll_with_selection() {
        let mut app = many_users_app(12);
        app.insert_str("@");
        for _ in 0..9 {
            app.controller.on_key(Key::Down);
        }
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert_eq!(app.popup_scroll, 2);
        assert!(output.contains("\u{25B8} user09"), "{output}");
        assert!(!output.contains("user00"));
    }

    #[test]
    fn closed_controller_draws_nothing() {
        let mut app = sample_app();
        app.insert_str("plain");
        render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert_eq!(app.popup_area, None);
    }

    #[test]
    fn far_right_trigger_keeps_popup_on_screen() {
        let mut app = sample_app();
        app.insert_str(&format!("{}@al", " ".repeat(65_540)));
        render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        let area = app.popup_area.unwrap();
        assert_eq!(area.right(), TERM_W);
        assert_eq!(area.y, 1);
    }
}
