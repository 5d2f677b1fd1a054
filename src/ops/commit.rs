use crate::model::candidate::Candidate;
use crate::model::token::{TextEdit, Token};

/// Canonical mention text for a candidate, trailing space included.
///
/// The space ends the word, so the locator no longer sees a trigger at the
/// caret once the edit is applied.
pub fn mention_text(candidate: &Candidate, trigger: char) -> String {
    format!("{trigger}{} ", candidate.display_name)
}

/// Replace `token` with the mention for `candidate`.
pub fn commit(candidate: &Candidate, token: &Token, trigger: char) -> TextEdit {
    TextEdit {
        start: token.start,
        delete_len: token.text.len(),
        insert: mention_text(candidate, trigger),
    }
}
