use std::num::NonZeroUsize;

use crate::model::candidate::Candidate;
use crate::model::config::CompleteConfig;
use crate::model::token::{TextEdit, Token};
use crate::ops::commit::commit;
use crate::ops::cursor::{Direction, advance};
use crate::ops::locate::locate;
use crate::ops::rank::Ranker;
use crate::util::unicode::display_width;

use super::CandidateSource;
use super::keys::{Key, KeyInput, KeyOutcome};

/// Where the dropdown hangs from: the start of the mention token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Byte offset of the trigger character
    pub offset: usize,
    /// 0-based line of the trigger
    pub line: usize,
    /// Display column of the trigger within its line
    pub column: usize,
}

impl Anchor {
    pub fn at(text: &str, offset: usize) -> Self {
        let before = &text[..offset];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Anchor {
            offset,
            line: before.matches('\n').count(),
            column: display_width(&before[line_start..]),
        }
    }
}

/// An open dropdown. Only built with a non-empty list and a selection inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenState {
    anchor: Anchor,
    token: Token,
    ranked: Vec<Candidate>,
    selected: usize,
}

impl OpenState {
    fn new(anchor: Anchor, token: Token, ranked: Vec<Candidate>) -> Option<Self> {
        if ranked.is_empty() {
            return None;
        }
        Some(OpenState {
            anchor,
            token,
            ranked,
            selected: 0,
        })
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn ranked(&self) -> &[Candidate] {
        &self.ranked
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_candidate(&self) -> &Candidate {
        &self.ranked[self.selected]
    }

    fn count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.ranked.len()).unwrap_or(NonZeroUsize::MIN)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum State {
    #[default]
    Closed,
    Open(OpenState),
}

/// Drives the mention dropdown from host events.
///
/// The host reports text and caret changes, offers keys, and applies the
/// edits handed back. The controller never touches the buffer itself.
#[derive(Debug, Clone)]
pub struct Controller {
    trigger: char,
    ranker: Ranker,
    state: State,
    /// Set by an explicit dismissal; cleared by the next text change
    dismissed: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Controller::new(&CompleteConfig::default())
    }
}

impl Controller {
    pub fn new(config: &CompleteConfig) -> Self {
        Controller {
            trigger: config.trigger,
            ranker: Ranker::from_config(config),
            state: State::Closed,
            dismissed: false,
        }
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    /// Read-only projection for the presentation layer.
    pub fn render_state(&self) -> &State {
        &self.state
    }

    pub fn open_state(&self) -> Option<&OpenState> {
        match &self.state {
            State::Open(open) => Some(open),
            State::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// The buffer changed; re-evaluate even after a dismissal.
    pub fn on_input<S>(&mut self, text: &str, caret: usize, source: &S)
    where
        S: CandidateSource + ?Sized,
    {
        self.dismissed = false;
        self.evaluate(text, caret, source);
    }

    /// The caret moved without a text change.
    pub fn on_caret_moved<S>(&mut self, text: &str, caret: usize, source: &S)
    where
        S: CandidateSource + ?Sized,
    {
        if self.dismissed {
            return;
        }
        self.evaluate(text, caret, source);
    }

    /// Offer a key. Keys are only intercepted while the dropdown is open.
    pub fn on_key(&mut self, input: impl Into<KeyInput>) -> KeyOutcome {
        let input = input.into();
        let State::Open(open) = &mut self.state else {
            return KeyOutcome::pass();
        };
        if input.is_chord() {
            return KeyOutcome::pass();
        }

        match input.key {
            Key::Down => {
                open.selected = advance(open.selected, Direction::Next, open.count());
                log::trace!(target: "mention.controller", "select {}", open.selected);
                KeyOutcome::consumed()
            }
            Key::Up => {
                open.selected = advance(open.selected, Direction::Prev, open.count());
                log::trace!(target: "mention.controller", "select {}", open.selected);
                KeyOutcome::consumed()
            }
            Key::Enter | Key::Tab => {
                let edit = commit(open.selected_candidate(), &open.token, self.trigger);
                self.close();
                KeyOutcome::commit(edit)
            }
            Key::Esc => {
                self.dismiss();
                KeyOutcome::consumed()
            }
            // Close but let the host move the caret
            Key::Left | Key::Right => {
                self.dismiss();
                KeyOutcome::pass()
            }
            _ => KeyOutcome::pass(),
        }
    }

    /// Commit the row at `index` (pointer press on the list).
    pub fn pick(&mut self, index: usize) -> Option<TextEdit> {
        let open = self.open_state()?;
        let candidate = open.ranked.get(index)?;
        let edit = commit(candidate, &open.token, self.trigger);
        self.close();
        Some(edit)
    }

    pub fn on_blur(&mut self) {
        self.dismiss();
    }

    pub fn on_pointer_down_outside(&mut self) {
        self.dismiss();
    }

    fn dismiss(&mut self) {
        if self.is_open() {
            log::trace!(target: "mention.controller", "dismissed");
            self.dismissed = true;
        }
        self.state = State::Closed;
    }

    fn close(&mut self) {
        log::trace!(target: "mention.controller", "closed");
        self.state = State::Closed;
    }

    fn evaluate<S>(&mut self, text: &str, caret: usize, source: &S)
    where
        S: CandidateSource + ?Sized,
    {
        let token = locate(text, caret);
        let Some(query) = token.query(self.trigger) else {
            self.state = State::Closed;
            return;
        };
        let ranked = self.ranker.rank(&query, source.candidates());
        let anchor = Anchor::at(text, token.start);

        // The whole open state is replaced at once, selection back at 0
        self.state = match OpenState::new(anchor, token, ranked) {
            Some(open) => {
                log::trace!(
                    target: "mention.controller",
                    "open at {} with {} candidates for {query:?}",
                    open.anchor.offset,
                    open.ranked.len()
                );
                State::Open(open)
            }
            None => State::Closed,
        };
    }
}
