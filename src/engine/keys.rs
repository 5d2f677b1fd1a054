use crate::model::token::TextEdit;

/// Host-independent key codes the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Esc,
    Backspace,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        KeyInput {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Ctrl/Alt chords belong to the host and are never intercepted.
    pub fn is_chord(&self) -> bool {
        self.modifiers.ctrl || self.modifiers.alt
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        KeyInput::plain(key)
    }
}

/// What the controller did with a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The host must not act on the key itself
    pub consumed: bool,
    /// Replacement the host should apply to its buffer
    pub edit: Option<TextEdit>,
}

impl KeyOutcome {
    pub fn pass() -> Self {
        KeyOutcome::default()
    }

    pub fn consumed() -> Self {
        KeyOutcome {
            consumed: true,
            edit: None,
        }
    }

    pub fn commit(edit: TextEdit) -> Self {
        KeyOutcome {
            consumed: true,
            edit: Some(edit),
        }
    }
}
