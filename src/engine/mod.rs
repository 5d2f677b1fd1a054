pub mod controller;
pub mod keys;

pub use controller::{Anchor, Controller, OpenState, State};
pub use keys::{Key, KeyInput, KeyOutcome, Modifiers};

use crate::model::candidate::Candidate;

/// Synchronous snapshot read of the candidate corpus.
///
/// Implementors own the corpus and any fetching; the engine only borrows it
/// for the duration of a single event.
pub trait CandidateSource {
    fn candidates(&self) -> &[Candidate];
}

impl CandidateSource for [Candidate] {
    fn candidates(&self) -> &[Candidate] {
        self
    }
}

impl CandidateSource for Vec<Candidate> {
    fn candidates(&self) -> &[Candidate] {
        self
    }
}
