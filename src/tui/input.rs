use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::engine::{Key, KeyInput, Modifiers};

use super::app::App;

/// Translate a terminal key into the controller's key vocabulary.
pub fn to_key_input(key: KeyEvent) -> KeyInput {
    let code = match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    KeyInput {
        key: code,
        modifiers: Modifiers {
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            alt: key.modifiers.contains(KeyModifiers::ALT),
        },
    }
}

/// Handle a key: the controller sees it first, the editor gets whatever it passes on.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        app.should_quit = true;
        return;
    }

    let outcome = app.controller.on_key(to_key_input(key));
    if let Some(edit) = outcome.edit {
        app.apply_edit(&edit);
        return;
    }
    if outcome.consumed {
        return;
    }

    let chord = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char(c) if !chord => {
            let mut buf = [0u8; 4];
            app.insert_str(c.encode_utf8(&mut buf));
        }
        KeyCode::Enter => app.insert_str("\n"),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete_forward(),
        KeyCode::Left => app.move_left(),
        KeyCode::Right => app.move_right(),
        KeyCode::Up => app.move_vertical(true),
        KeyCode::Down => app.move_vertical(false),
        KeyCode::Home => app.move_home(),
        KeyCode::End => app.move_end(),
        KeyCode::Esc => app.status = None,
        _ => {}
    }
}

/// Handle a bracketed paste. Pasted text is a text change like any other.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    let clean = text.replace("\r\n", "\n").replace('\r', "\n");
    app.insert_str(&clean);
}

/// Left press on a dropdown row picks it; anywhere else dismisses and places the caret.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let (x, y) = (mouse.column, mouse.row);

    if let Some(area) = app.popup_area
        && x >= area.x
        && x < area.x + area.width
        && y > area.y
        && y + 1 < area.y + area.height
    {
        let index = app.popup_scroll + (y - area.y - 1) as usize;
        if let Some(edit) = app.controller.pick(index) {
            app.apply_edit(&edit);
        }
        return;
    }

    app.controller.on_pointer_down_outside();
    let editor = app.editor_area;
    if x >= editor.x && x < editor.x + editor.width && y >= editor.y && y < editor.y + editor.height
    {
        let offset = app.offset_at_cell(x, y);
        app.set_caret(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::directory::UserDirectory;
    use crate::model::candidate::User;
    use crate::model::config::MentionConfig;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn app() -> App {
        let dir = UserDirectory::from_users(vec![
            User::new("users/1", "alice", "Alice"),
            User::new("users/2", "albert", "Albert"),
        ]);
        App::new(dir, MentionConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    fn click(x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn down_then_enter_commits_second_row() {
        let mut app = app();
        type_str(&mut app, "cc @al");
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.buffer, "cc @Albert ");
        assert!(!app.controller.is_open());
    }

    #[test]
    fn enter_inserts_newline_when_closed() {
        let mut app = app();
        type_str(&mut app, "hi");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.buffer, "hi\n");
    }

    #[test]
    fn escape_keeps_text_and_caret() {
        let mut app = app();
        type_str(&mut app, "@al");
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.controller.is_open());
        assert_eq!(app.buffer, "@al");
        assert_eq!(app.caret, 3);
    }

    #[test]
    fn left_dismisses_and_moves() {
        let mut app = app();
        type_str(&mut app, "@al");
        handle_key(&mut app, key(KeyCode::Left));
        assert!(!app.controller.is_open());
        assert_eq!(app.caret, 2);
        type_str(&mut app, "x");
        assert_eq!(app.buffer, "@axl");
    }

    #[test]
    fn ctrl_q_quits() {
        let mut app = app();
        handle_key(
            &mut app,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::CONTROL,
                kind: crossterm::event::KeyEventKind::Press,
                state: KeyEventState::NONE,
            },
        );
        assert!(app.should_quit);
    }

    #[test]
    fn click_on_row_picks_it() {
        let mut app = app();
        type_str(&mut app, "@al");
        app.popup_area = Some(Rect::new(0, 1, 20, 4));
        app.popup_scroll = 0;
        handle_mouse(&mut app, click(3, 3));
        assert_eq!(app.buffer, "@Albert ");
    }

    #[test]
    fn click_outside_dismisses() {
        let mut app = app();
        type_str(&mut app, "@al");
        app.popup_area = Some(Rect::new(0, 1, 20, 4));
        app.editor_area = Rect::new(0, 0, 40, 10);
        handle_mouse(&mut app, click(1, 0));
        assert!(!app.controller.is_open());
        assert_eq!(app.caret, 1);
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let mut app = app();
        handle_paste(&mut app, "a\r\nb\rc");
        assert_eq!(app.buffer, "a\nb\nc");
    }
}
