use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::engine::Controller;
use crate::io::config_io;
use crate::io::directory::UserDirectory;
use crate::io::watcher::DirectoryWatcher;
use crate::model::config::MentionConfig;
use crate::model::token::TextEdit;
use crate::util::unicode::{
    display_width, line_bounds, next_grapheme_boundary, offset_at_column, prev_grapheme_boundary,
};

use super::input;
use super::render;
use super::theme::Theme;

/// Editor host state: a plain text buffer with the mention controller attached
pub struct App {
    pub buffer: String,
    /// Caret as a byte offset into `buffer`
    pub caret: usize,
    pub controller: Controller,
    pub directory: UserDirectory,
    pub config: MentionConfig,
    pub theme: Theme,
    pub should_quit: bool,
    /// One-line message for the status row
    pub status: Option<String>,
    /// Editor rect from the last frame
    pub editor_area: Rect,
    /// First buffer line visible in the editor
    pub scroll_line: usize,
    /// Dropdown rect from the last frame, for mouse hit-testing
    pub popup_area: Option<Rect>,
    /// First list index visible in the dropdown
    pub popup_scroll: usize,
}

impl App {
    pub fn new(directory: UserDirectory, config: MentionConfig) -> Self {
        App {
            buffer: String::new(),
            caret: 0,
            controller: Controller::new(&config.complete),
            directory,
            theme: Theme::from_config(&config.ui),
            config,
            should_quit: false,
            status: None,
            editor_area: Rect::default(),
            scroll_line: 0,
            popup_area: None,
            popup_scroll: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Controller notifications
    // -----------------------------------------------------------------------

    fn text_changed(&mut self) {
        self.controller
            .on_input(&self.buffer, self.caret, &self.directory);
    }

    fn caret_moved(&mut self) {
        self.controller
            .on_caret_moved(&self.buffer, self.caret, &self.directory);
    }

    /// Apply an edit handed back by the controller.
    pub fn apply_edit(&mut self, edit: &TextEdit) {
        self.caret = edit.apply(&mut self.buffer);
        self.text_changed();
    }

    /// Re-read the directory file and re-rank an open dropdown.
    pub fn reload_directory(&mut self) {
        match self.directory.refresh() {
            Ok(()) => {
                self.status = Some(format!("{} user(s) loaded", self.directory.len()));
                if self.controller.is_open() {
                    self.text_changed();
                }
            }
            Err(e) => {
                log::warn!(target: "mention.directory", "reload failed: {e}");
                self.status = Some(e.to_string());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    pub fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.caret, text);
        self.caret += text.len();
        self.text_changed();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.caret) {
            self.buffer.replace_range(prev..self.caret, "");
            self.caret = prev;
            self.text_changed();
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.caret) {
            self.buffer.replace_range(self.caret..next, "");
            self.text_changed();
        }
    }

    // -----------------------------------------------------------------------
    // Caret movement
    // -----------------------------------------------------------------------

    pub fn set_caret(&mut self, caret: usize) {
        if caret != self.caret {
            self.caret = caret;
            self.caret_moved();
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.caret) {
            self.set_caret(prev);
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.caret) {
            self.set_caret(next);
        }
    }

    pub fn move_home(&mut self) {
        let (start, _) = line_bounds(&self.buffer, self.caret);
        self.set_caret(start);
    }

    pub fn move_end(&mut self) {
        let (_, end) = line_bounds(&self.buffer, self.caret);
        self.set_caret(end);
    }

    /// Move to the previous (`up`) or next line, keeping the display column.
    pub fn move_vertical(&mut self, up: bool) {
        let (start, end) = line_bounds(&self.buffer, self.caret);
        let col = display_width(&self.buffer[start..self.caret]);
        let target = if up {
            if start == 0 {
                return;
            }
            line_bounds(&self.buffer, start - 1)
        } else {
            if end == self.buffer.len() {
                return;
            }
            line_bounds(&self.buffer, end + 1)
        };
        let line = &self.buffer[target.0..target.1];
        self.set_caret(target.0 + offset_at_column(line, col));
    }

    /// Buffer line and display column of the caret.
    pub fn caret_position(&self) -> (usize, usize) {
        let (start, _) = line_bounds(&self.buffer, self.caret);
        let line = self.buffer[..start].matches('\n').count();
        (line, display_width(&self.buffer[start..self.caret]))
    }

    /// Byte offset for a screen cell inside the editor area.
    pub fn offset_at_cell(&self, x: u16, y: u16) -> usize {
        let row = (y.saturating_sub(self.editor_area.y)) as usize + self.scroll_line;
        let col = x.saturating_sub(self.editor_area.x) as usize;
        let mut start = 0;
        for (i, line) in self.buffer.split('\n').enumerate() {
            if i == row {
                return start + offset_at_column(line, col);
            }
            start += line.len() + 1;
        }
        self.buffer.len()
    }
}

/// Alternate screen plus the event sources the editor reads: mouse, focus and paste.
fn enter_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        EnableBracketedPaste
    )
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        DisableBracketedPaste,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
}

pub fn run(users: &Path, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path)?;

    // A missing directory is not fatal; the editor still works without mentions
    let mut directory = UserDirectory::new(users);
    let load_error = directory.ensure_loaded().err();
    let watcher = match DirectoryWatcher::start(users) {
        Ok(w) => Some(w),
        Err(e) => {
            log::warn!(target: "mention.directory", "not watching {}: {e}", users.display());
            None
        }
    };

    let mut app = App::new(directory, config);
    app.status = match load_error {
        Some(e) => Some(e.to_string()),
        None => Some(format!("{} user(s) loaded", app.directory.len())),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    enter_screen(&mut stdout)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    leave_screen(terminal.backend_mut())?;
    terminal.show_cursor()?;

    if result.is_ok() && !app.buffer.is_empty() {
        println!("{}", app.buffer);
    }
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&DirectoryWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if watcher.is_some_and(|w| w.poll()) {
            app.reload_directory();
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::FocusLost => app.controller.on_blur(),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
