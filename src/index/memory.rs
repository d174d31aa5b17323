// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory phrase index built on [`PrefixIndex`].
//!
//! Two prefix tries hold the distinct surface tokens and stem tokens of every
//! stored phrase. A term expands to the tokens its text (or stem) prefixes,
//! the postings of those tokens give `(record, position)` pairs, and each pair
//! is verified against the whole term tuple with [`PhraseRecord::matches_at`].
//!
//! A third trie holds whole stemmed phrases for exact membership checks.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::trie::{PrefixIndex, DEFAULT_MAX_DEPTH};
use super::{IndexEntry, PhraseIndex, PhraseRecord};
use crate::error::Result;
use crate::query::Term;
use crate::util::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Posting {
    record: u32,
    position: u32,
}

/// Prefix trie over tokens plus the postings for each token.
#[derive(Debug, Clone)]
struct TokenTable {
    trie: PrefixIndex,
    postings: HashMap<String, Vec<Posting>>,
}

impl TokenTable {
    fn new(max_depth: usize) -> Self {
        Self {
            trie: PrefixIndex::with_depth(max_depth),
            postings: HashMap::new(),
        }
    }

    fn add(&mut self, token: &str, posting: Posting) {
        self.trie.insert(token);
        self.postings.entry(token.to_string()).or_default().push(posting);
    }

    /// Postings of every token that starts with `prefix`.
    fn lookup(&self, prefix: &str, out: &mut Vec<Posting>) {
        for token in self.trie.get_prefix_matches(prefix) {
            // Leaf buckets past the depth bound can hold diverging tokens.
            if !token.starts_with(prefix) {
                continue;
            }
            if let Some(postings) = self.postings.get(&token) {
                out.extend_from_slice(postings);
            }
        }
    }
}

/// In-memory [`PhraseIndex`].
#[derive(Debug, Clone)]
pub struct TrieIndex {
    max_depth: usize,
    records: Vec<Arc<PhraseRecord>>,
    by_text: HashMap<String, usize>,
    words: TokenTable,
    stems: TokenTable,
    stemmed_phrases: PrefixIndex,
}

impl Default for TrieIndex {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl TrieIndex {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            records: Vec::new(),
            by_text: HashMap::new(),
            words: TokenTable::new(max_depth),
            stems: TokenTable::new(max_depth),
            stemmed_phrases: PrefixIndex::with_depth(max_depth),
        }
    }

    /// Build an index from entries, skipping duplicates.
    pub fn from_entries<I: IntoIterator<Item = IndexEntry>>(entries: I, max_depth: usize) -> Self {
        let mut index = Self::new(max_depth);
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn records(&self) -> &[Arc<PhraseRecord>] {
        &self.records
    }

    fn insert(&mut self, entry: IndexEntry) -> bool {
        let record = PhraseRecord::from_entry(&entry);
        if record.text.is_empty() || self.by_text.contains_key(&record.text) {
            return false;
        }
        let Ok(id) = u32::try_from(self.records.len()) else {
            tracing::warn!(line = entry.line, "record limit reached, entry dropped");
            return false;
        };

        for (position, token) in record.tokens().iter().enumerate() {
            self.words.add(token, Posting { record: id, position: position as u32 });
        }
        for (position, stem) in record.stems().iter().enumerate() {
            self.stems.add(stem, Posting { record: id, position: position as u32 });
        }
        self.stemmed_phrases.insert(&record.stems().join(" "));
        self.by_text.insert(record.text.clone(), self.records.len());
        self.records.push(Arc::new(record));
        true
    }

    fn candidates(&self, first: &Term) -> Vec<Posting> {
        let mut postings = Vec::new();
        if !first.text.is_empty() {
            self.words.lookup(&first.text, &mut postings);
        }
        if !first.stem.is_empty() {
            self.stems.lookup(&first.stem, &mut postings);
        }
        postings
    }
}

impl PhraseIndex for TrieIndex {
    fn add(&mut self, entry: IndexEntry) -> Result<bool> {
        Ok(self.insert(entry))
    }

    fn search(&self, terms: &[Term], limit: usize) -> Vec<Arc<PhraseRecord>> {
        let Some(first) = terms.first() else {
            return Vec::new();
        };
        if limit == 0 {
            return Vec::new();
        }

        let hits: BTreeSet<usize> = self
            .candidates(first)
            .into_iter()
            .filter_map(|posting| {
                let id = posting.record as usize;
                self.records[id]
                    .matches_at(terms, posting.position as usize)
                    .then_some(id)
            })
            .collect();

        let mut ids: Vec<usize> = hits.into_iter().collect();
        ids.sort_by_key(|&id| (self.records[id].word_count(), id));
        ids.truncate(limit);
        ids.into_iter().map(|id| Arc::clone(&self.records[id])).collect()
    }

    fn contains_stemmed(&self, stemmed: &str) -> bool {
        self.stemmed_phrases.contains(&normalize(stemmed))
    }

    fn entries(&self) -> Vec<IndexEntry> {
        self.records.iter().map(|r| r.entry()).collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
