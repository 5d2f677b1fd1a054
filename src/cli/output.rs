use serde::Serialize;

use crate::model::candidate::Candidate;
use crate::model::token::{TextEdit, Token};
use crate::ops::rank::Scored;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct LocateJson<'a> {
    pub token: &'a str,
    pub start: usize,
    pub trigger: bool,
}

#[derive(Serialize)]
pub struct CandidateJson<'a> {
    pub id: &'a str,
    pub display_name: &'a str,
    pub username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

#[derive(Serialize)]
pub struct CompleteJson<'a> {
    pub selected: CandidateJson<'a>,
    pub edit: &'a TextEdit,
    pub text: &'a str,
    pub caret: usize,
}

#[derive(Serialize)]
pub struct UsersJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
    pub users: Vec<CandidateJson<'a>>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn locate_to_json(token: &Token, trigger: char) -> LocateJson<'_> {
    LocateJson {
        token: &token.text,
        start: token.start,
        trigger: token.is_trigger(trigger),
    }
}

pub fn candidate_to_json(candidate: &Candidate) -> CandidateJson<'_> {
    CandidateJson {
        id: &candidate.id,
        display_name: &candidate.display_name,
        username: &candidate.username,
        similarity: None,
    }
}

pub fn scored_to_json<'a>(hit: &Scored<'a>) -> CandidateJson<'a> {
    CandidateJson {
        similarity: Some(hit.similarity),
        ..candidate_to_json(hit.candidate)
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

pub fn format_token(token: &Token, trigger: char) -> String {
    let kind = if token.is_trigger(trigger) {
        "mention"
    } else {
        "word"
    };
    format!("{:?} at {} ({})", token.text, token.start, kind)
}

pub fn format_edit(edit: &TextEdit) -> String {
    format!(
        "replace {} byte(s) at {} with {:?}",
        edit.delete_len, edit.start, edit.insert
    )
}

/// One row per candidate, 1-based like the dropdown reads.
pub fn format_candidate_list(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:>2}. {}", i + 1, c.label()))
        .collect()
}
