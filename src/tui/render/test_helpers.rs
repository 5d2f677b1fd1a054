use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::directory::UserDirectory;
use crate::model::candidate::User;
use crate::model::config::MentionConfig;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Alice, Albert and Bob with nicknames matching their usernames.
pub fn sample_app() -> App {
    let dir = UserDirectory::from_users(vec![
        User::new("users/1", "alice", "Alice"),
        User::new("users/2", "albert", "Albert"),
        User::new("users/3", "bob", "Bob"),
    ]);
    App::new(dir, MentionConfig::default())
}

/// `n` users named user00, user01, ... without nicknames.
pub fn many_users_app(n: usize) -> App {
    let users = (0..n)
        .map(|i| {
            let name = format!("user{i:02}");
            User::new(&format!("users/{i}"), &name, "")
        })
        .collect();
    App::new(UserDirectory::from_users(users), MentionConfig::default())
}
