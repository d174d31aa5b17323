//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use taxon::ScoredPhrase;

// Re-export canonical test utilities from taxon::testing
pub use taxon::testing::{
    make_entries, make_entry, make_matcher, make_matcher_with, make_vocabulary_tsv, sample_matcher,
    CountingIndex, SAMPLE_VOCABULARY,
};

// ============================================================================
// QUERIES
// ============================================================================

/// A sentence mentioning two vocabulary phrases among filler words.
pub const BREAKFAST_QUERY: &str = "I like lemon juice and granulated sugar on my pancakes";

/// Inputs that normalize to nothing.
pub const EMPTY_QUERIES: &[&str] = &["", "   ", "?!", "...", "\t\n", "-- --"];

// ============================================================================
// HELPERS
// ============================================================================

/// Phrase names of scored results, in output order.
pub fn phrases(results: &[ScoredPhrase]) -> Vec<&str> {
    results.iter().map(|r| r.phrase.as_str()).collect()
}

/// Write a dictionary file for `phrases` into `dir` and return its path.
pub fn write_vocabulary(dir: &Path, language: &str, phrases: &[&str]) -> PathBuf {
    let path = dir.join("vocabulary.tsv");
    fs::write(&path, make_vocabulary_tsv(language, phrases)).expect("write vocabulary");
    path
}
