// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction and the provider seam the search path talks to.
//!
//! - [`trie`]: the bounded-depth [`PrefixIndex`] over normalized strings
//! - [`memory`]: [`TrieIndex`], an in-memory [`PhraseIndex`] built from prefix tries
//! - [`storage`]: RAM and file backends that create and open indexes by name
//!
//! Search only ever sees the [`PhraseIndex`] trait, so a different backend can
//! be dropped in without touching retrieval or scoring.

pub mod memory;
pub mod storage;
pub mod trie;

pub use memory::TrieIndex;
pub use storage::{IndexStorage, StorageKind};
pub use trie::{PrefixIndex, DEFAULT_MAX_DEPTH};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::Term;
use crate::util::normalize;

/// What ingestion writes into an index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Original words joined by spaces, casing preserved.
    pub original: String,
    /// Per-word stems joined by spaces.
    pub stemmed: String,
    /// Line number in the source vocabulary file.
    pub line: u64,
}

impl IndexEntry {
    pub fn new(original: impl Into<String>, stemmed: impl Into<String>, line: u64) -> Self {
        Self {
            original: original.into(),
            stemmed: stemmed.into(),
            line,
        }
    }
}

/// A stored phrase with the derived forms retrieval and scoring need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRecord {
    /// Display form: lowercased original words joined by single spaces.
    pub phrase: String,
    /// Match form: `normalize(phrase)`.
    pub text: String,
    pub line: u64,
    original: String,
    stemmed: String,
    tokens: Vec<String>,
    stems: Vec<String>,
}

impl PhraseRecord {
    pub fn from_entry(entry: &IndexEntry) -> Self {
        let phrase = entry
            .original
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        let text = normalize(&phrase);
        let tokens = text.split(' ').filter(|t| !t.is_empty()).map(String::from).collect();
        let stems = normalize(&entry.stemmed)
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        Self {
            phrase,
            text,
            line: entry.line,
            original: entry.original.clone(),
            stemmed: entry.stemmed.clone(),
            tokens,
            stems,
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    /// The entry this record was built from.
    pub fn entry(&self) -> IndexEntry {
        IndexEntry {
            original: self.original.clone(),
            stemmed: self.stemmed.clone(),
            line: self.line,
        }
    }

    /// Do `terms` match consecutive tokens starting at `position`?
    ///
    /// A token matches a term when it starts with the term's text, or when the
    /// token's stem starts with the term's stem.
    pub fn matches_at(&self, terms: &[Term], position: usize) -> bool {
        terms.iter().enumerate().all(|(offset, term)| {
            let at = position + offset;
            let surface = self
                .tokens
                .get(at)
                .is_some_and(|token| token.starts_with(&term.text));
            surface
                || (!term.stem.is_empty()
                    && self.stems.get(at).is_some_and(|stem| stem.starts_with(&term.stem)))
        })
    }
}

/// The capability search needs from an index backend.
pub trait PhraseIndex: Send + Sync {
    /// Store one entry. Returns `Ok(false)` when an identical phrase is already present.
    fn add(&mut self, entry: IndexEntry) -> Result<bool>;

    /// Records whose consecutive tokens prefix-match `terms` in order, at most `limit`.
    ///
    /// Shorter phrases rank first, then ingestion order.
    fn search(&self, terms: &[Term], limit: usize) -> Vec<Arc<PhraseRecord>>;

    /// Is this stemmed phrase stored exactly?
    fn contains_stemmed(&self, stemmed: &str) -> bool;

    /// Every stored entry, in ingestion order.
    fn entries(&self) -> Vec<IndexEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
