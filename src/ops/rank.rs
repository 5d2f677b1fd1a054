use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::model::candidate::Candidate;
use crate::model::config::CompleteConfig;

/// Longest query the matcher scores. The matcher's u16 score overflows well
/// past this, so longer queries match nothing.
pub const MAX_QUERY_CHARS: usize = 256;

/// Longest search key the matcher scores; longer keys are skipped.
pub const MAX_KEY_CHARS: usize = 1024;

/// Ranks a candidate corpus against the text typed after the trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranker {
    pub max_results: usize,
    pub browse_limit: usize,
    pub min_similarity: f64,
}

impl Default for Ranker {
    fn default() -> Self {
        Ranker::from_config(&CompleteConfig::default())
    }
}

/// A candidate that cleared the threshold, with its match quality.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<'a> {
    pub candidate: &'a Candidate,
    pub score: u16,
    pub similarity: f64,
}

impl Ranker {
    pub fn from_config(config: &CompleteConfig) -> Self {
        Ranker {
            max_results: config.max_results,
            browse_limit: config.browse_limit,
            min_similarity: config.min_similarity,
        }
    }

    /// Ranked, capped list of candidates for `query`.
    ///
    /// An empty query browses: the first `browse_limit` candidates in corpus
    /// order. Otherwise candidates are ordered best match first, ties kept in
    /// corpus order.
    pub fn rank(&self, query: &str, corpus: &[Candidate]) -> Vec<Candidate> {
        if query.is_empty() {
            return corpus.iter().take(self.browse_limit).cloned().collect();
        }
        self.scored(query, corpus)
            .into_iter()
            .map(|s| s.candidate.clone())
            .collect()
    }

    /// Like [`Ranker::rank`] for a non-empty query, but keeps the scores.
    pub fn scored<'a>(&self, query: &str, corpus: &'a [Candidate]) -> Vec<Scored<'a>> {
        let query = query.to_lowercase();
        let mut scorer = Scorer::new(&query);
        let Some(perfect) = scorer.perfect() else {
            return Vec::new();
        };

        let mut hits: Vec<Scored<'a>> = corpus
            .iter()
            .filter_map(|candidate| {
                let score = scorer.best_of(&candidate.search_keys)?;
                let similarity = f64::from(score) / f64::from(perfect);
                (similarity >= self.min_similarity).then_some(Scored {
                    candidate,
                    score,
                    similarity,
                })
            })
            .collect();

        // Stable: equal scores stay in corpus order
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits.truncate(self.max_results);
        hits
    }
}

/// Rank with the default limits and threshold.
pub fn rank(query: &str, corpus: &[Candidate]) -> Vec<Candidate> {
    Ranker::default().rank(query, corpus)
}

/// Similarity of `candidate` to `query` in [0, 1], or `None` when it does not match at all.
pub fn similarity(query: &str, candidate: &Candidate) -> Option<f64> {
    let query = query.to_lowercase();
    let mut scorer = Scorer::new(&query);
    let perfect = scorer.perfect()?;
    let score = scorer.best_of(&candidate.search_keys)?;
    Some(f64::from(score) / f64::from(perfect))
}

struct Scorer {
    atom: Atom,
    matcher: Matcher,
    needle: String,
    buf: Vec<char>,
}

impl Scorer {
    fn new(query: &str) -> Self {
        Scorer {
            atom: Atom::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
                false,
            ),
            matcher: Matcher::new(Config::DEFAULT),
            needle: query.to_string(),
            buf: Vec::new(),
        }
    }

    /// Score of the query matched against itself; the ceiling for similarity.
    fn perfect(&mut self) -> Option<u16> {
        if self.needle.is_empty() || self.needle.chars().count() > MAX_QUERY_CHARS {
            return None;
        }
        let needle = self.needle.clone();
        self.score(&needle).filter(|s| *s > 0)
    }

    fn score(&mut self, haystack: &str) -> Option<u16> {
        if haystack.chars().count() > MAX_KEY_CHARS {
            return None;
        }
        let haystack = Utf32Str::new(haystack, &mut self.buf);
        self.atom.score(haystack, &mut self.matcher)
    }

    fn best_of(&mut self, keys: &[String]) -> Option<u16> {
        keys.iter().filter_map(|k| self.score(k)).max()
    }
}
