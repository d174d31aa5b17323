// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate scoring: an ordered stack of guards, then additive terms.
//!
//! ```text
//! 1. candidate verbatim in query      → |tuple|² × direct boost
//! 2. word count ≠ |tuple|             → REJECTED
//! 3. fuzzy tuple pattern misses query → REJECTED
//! 4. + aligned chars(query, candidate)          × sentence match
//!    − min lev(candidate, applicable subphrase) × sentence mismatch
//!    + Σ aligned chars(term, word)              × word alignment boost
//!    − Σ lev(term, word)                        × word alignment penalty
//!    capped one point below the direct score for the tuple
//! ```
//!
//! All inputs are normalized text; the caller maps the winner back to its
//! display phrase.

use std::sync::Arc;

use regex::Regex;

use super::core::{is_rejected, ScoringWeights, REJECTED, WILDCARD};
use crate::fuzzy::{levenshtein, min_levenshtein};
use crate::index::PhraseRecord;
use crate::query::Term;
use crate::util::aligned_matches;

/// Anything that can be scored: exposes its normalized match text.
pub trait Candidate {
    fn text(&self) -> &str;
}

impl Candidate for str {
    fn text(&self) -> &str {
        self
    }
}

impl Candidate for String {
    fn text(&self) -> &str {
        self
    }
}

impl Candidate for &str {
    fn text(&self) -> &str {
        self
    }
}

impl Candidate for PhraseRecord {
    fn text(&self) -> &str {
        &self.text
    }
}

impl<T: Candidate + ?Sized> Candidate for Arc<T> {
    fn text(&self) -> &str {
        (**self).text()
    }
}

/// A term tuple with its fuzzy query pattern compiled once.
#[derive(Debug, Clone)]
pub struct TermTuple {
    words: Vec<String>,
    pattern: Regex,
}

impl TermTuple {
    /// Compile the fuzzy pattern for `words`.
    ///
    /// Multi-word tuples allow a few trailing word characters and any
    /// punctuation after each term, with whitespace between terms. A single
    /// term allows up to two trailing word characters.
    pub fn new(words: Vec<String>) -> Result<Self, regex::Error> {
        let pattern = if words.len() == 1 {
            format!(r"{}\w?\w?", regex::escape(&words[0]))
        } else {
            words
                .iter()
                .map(|w| format!(r"{}\w*?\W*", regex::escape(w)))
                .collect::<Vec<_>>()
                .join(r"\s+")
        };
        Ok(Self {
            pattern: Regex::new(&pattern)?,
            words,
        })
    }

    pub fn from_terms(terms: &[Term]) -> Result<Self, regex::Error> {
        Self::new(terms.iter().map(|t| t.text.clone()).collect())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Does the fuzzy pattern occur anywhere in `query`?
    pub fn matches(&self, query: &str) -> bool {
        self.pattern.is_match(query)
    }
}

/// Scores candidates against a term tuple.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateScorer {
    weights: ScoringWeights,
}

impl CandidateScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score one candidate. See the module docs for the order of operations.
    pub fn score(&self, candidate: &str, tuple: &TermTuple, subphrases: &[String], query: &str) -> f64 {
        let w = &self.weights;

        if !candidate.is_empty() && query.contains(candidate) {
            return w.direct_match(tuple.len());
        }

        let words: Vec<&str> = candidate.split_whitespace().collect();
        if words.len() != tuple.len() {
            return REJECTED;
        }

        if !tuple.matches(query) {
            return REJECTED;
        }

        let mut phrase_score = aligned_matches(query, candidate) as f64 * w.sentence_match_boost;
        if let Some(distance) = min_levenshtein(candidate, subphrases.iter().map(String::as_str)) {
            phrase_score -= distance as f64 * w.sentence_mismatch_penalty;
        }

        let pairs = tuple.len().max(words.len());
        let word_score: f64 = (0..pairs)
            .map(|i| {
                let term = tuple.words.get(i).map_or(WILDCARD, String::as_str);
                let word = words.get(i).copied().unwrap_or(WILDCARD);
                aligned_matches(term, word) as f64 * w.word_alignment_boost
                    - levenshtein(term, word) as f64 * w.word_alignment_penalty
            })
            .sum();

        (phrase_score + word_score).min(w.fuzzy_ceiling(tuple.len()))
    }

    /// Highest-scoring candidate and its score.
    ///
    /// Ties go to the earliest candidate. `None` when the slice is empty or
    /// every candidate was rejected.
    pub fn select_best<'c, C: Candidate>(
        &self,
        candidates: &'c [C],
        tuple: &TermTuple,
        subphrases: &[String],
        query: &str,
    ) -> Option<(&'c C, f64)> {
        let mut best: Option<(&'c C, f64)> = None;
        for candidate in candidates {
            let score = self.score(candidate.text(), tuple, subphrases, query);
            if is_rejected(score) {
                continue;
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        best
    }
}
