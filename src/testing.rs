// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::MatcherConfig;
use crate::error::Result;
use crate::index::{IndexEntry, PhraseIndex, PhraseRecord, TrieIndex};
use crate::query::Term;
use crate::search::PhraseMatcher;
use crate::stem::stemmer_for;

/// A small food vocabulary used across tests and benches.
pub const SAMPLE_VOCABULARY: &[&str] = &[
    "lemon juice",
    "lemon",
    "lemon curd",
    "orange juice",
    "apple juice",
    "pancakes",
    "buttermilk pancakes",
    "maple syrup",
    "whipped cream",
    "strawberries",
    "strawberry jam",
    "greek yogurt",
    "black tea",
    "green tea",
    "iced tea",
    "tea biscuits",
    "dark chocolate",
    "chocolate chip cookies",
    "peanut butter",
    "crème brûlée",
];

/// Build an entry, stemming `phrase` with the default language.
///
/// This is the canonical implementation used across all tests.
pub fn make_entry(phrase: &str, line: u64) -> IndexEntry {
    let stemmer = stemmer_for(None);
    IndexEntry::new(phrase, stemmer.stem_phrase(phrase), line)
}

/// Entries for `phrases`, numbered from line 1.
pub fn make_entries(phrases: &[&str]) -> Vec<IndexEntry> {
    phrases
        .iter()
        .enumerate()
        .map(|(i, phrase)| make_entry(phrase, i as u64 + 1))
        .collect()
}

/// In-memory matcher over `phrases` with the default configuration.
pub fn make_matcher(phrases: &[&str]) -> PhraseMatcher {
    make_matcher_with(phrases, &MatcherConfig::default())
}

pub fn make_matcher_with(phrases: &[&str], config: &MatcherConfig) -> PhraseMatcher {
    PhraseMatcher::from_entries(make_entries(phrases), config).expect("valid test config")
}

/// Matcher over [`SAMPLE_VOCABULARY`].
pub fn sample_matcher() -> PhraseMatcher {
    make_matcher(SAMPLE_VOCABULARY)
}

/// Dictionary file contents for `phrases`: a header line, then one
/// `id<TAB>lang:word-word` line per phrase.
pub fn make_vocabulary_tsv(language: &str, phrases: &[&str]) -> String {
    let mut out = String::from("id\tentry\n");
    for (i, phrase) in phrases.iter().enumerate() {
        out.push_str(&format!("{}\t{}:{}\n", i + 1, language, phrase.replace(' ', "-")));
    }
    out
}

/// Wraps an index and counts `search` calls.
#[derive(Debug)]
pub struct CountingIndex<I = TrieIndex> {
    inner: I,
    searches: Arc<AtomicUsize>,
}

impl<I: PhraseIndex> CountingIndex<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            searches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter, still readable after the index moves into a matcher.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.searches)
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

impl<I: PhraseIndex> PhraseIndex for CountingIndex<I> {
    fn add(&mut self, entry: IndexEntry) -> Result<bool> {
        self.inner.add(entry)
    }

    fn search(&self, terms: &[Term], limit: usize) -> Vec<Arc<PhraseRecord>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.inner.search(terms, limit)
    }

    fn contains_stemmed(&self, stemmed: &str) -> bool {
        self.inner.contains_stemmed(stemmed)
    }

    fn entries(&self) -> Vec<IndexEntry> {
        self.inner.entries()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
