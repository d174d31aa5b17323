// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query decomposition.
//!
//! A free-text query becomes a sequence of [`Term`]s, and from those every
//! 1-, 2- and 3-term combination (not just contiguous windows) is generated,
//! longest first. Combinations skip over filler words, so "juice of lemons"
//! still yields the tuple `(juice, lemons)`.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::stem::Stemmer;
use crate::util::normalize;

/// Longest term tuple generated from a query.
pub const MAX_NGRAM: usize = 3;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Decimal numbers stay whole, apostrophes stay inside words.
    Regex::new(r"\d+(?:[.,]\d+)+|\w+(?:['’]\w+)*").expect("token pattern compiles")
});

/// One query word: the normalized surface form and its stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    pub text: String,
    pub stem: String,
}

impl Term {
    pub fn new(text: impl Into<String>, stem: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stem: stem.into(),
        }
    }

    /// Term whose stem is its own text.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            stem: text.clone(),
            text,
        }
    }
}

/// Split normalized text into word tokens. Punctuation-only input yields nothing.
pub fn tokenize(normalized: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A query after normalization and tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedQuery {
    /// `normalize(raw)`; the whole-query cache key.
    pub normalized: String,
    /// Terms in query order, duplicates kept.
    pub terms: Vec<Term>,
    /// Term texts joined by single spaces. Substring checks run against this.
    pub phrase: String,
}

impl DecomposedQuery {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn texts(&self) -> Vec<String> {
        self.terms.iter().map(|t| t.text.clone()).collect()
    }
}

/// Turns raw query text into terms.
#[derive(Clone)]
pub struct QueryDecomposer {
    stemmer: Arc<dyn Stemmer>,
}

impl std::fmt::Debug for QueryDecomposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryDecomposer").finish_non_exhaustive()
    }
}

impl QueryDecomposer {
    pub fn new(stemmer: Arc<dyn Stemmer>) -> Self {
        Self { stemmer }
    }

    pub fn stemmer(&self) -> &dyn Stemmer {
        self.stemmer.as_ref()
    }

    pub fn decompose(&self, raw: &str) -> DecomposedQuery {
        self.decompose_normalized(normalize(raw))
    }

    /// Decompose text that is already normalized.
    pub fn decompose_normalized(&self, normalized: String) -> DecomposedQuery {
        let terms: Vec<Term> = tokenize(&normalized)
            .into_iter()
            .map(|text| {
                let stem = normalize(&self.stemmer.stem(&text));
                Term { text, stem }
            })
            .collect();
        let phrase = join_texts(&terms);

        DecomposedQuery {
            normalized,
            terms,
            phrase,
        }
    }
}

fn join_texts(terms: &[Term]) -> String {
    terms
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// All `n`-element combinations of `items`, in lexicographic index order.
pub fn combinations<T: Clone>(items: &[T], n: usize) -> Vec<Vec<T>> {
    let len = items.len();
    if n > len {
        return Vec::new();
    }
    if n == 0 {
        return vec![Vec::new()];
    }

    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..n).collect();

    loop {
        out.push(idx.iter().map(|&i| items[i].clone()).collect());

        // Rightmost slot that can still move forward.
        let Some(slot) = (0..n).rev().find(|&s| idx[s] != s + len - n) else {
            return out;
        };
        idx[slot] += 1;
        for s in slot + 1..n {
            idx[s] = idx[s - 1] + 1;
        }
    }
}

/// Every term tuple to try for a query: all combinations of size 3, then 2, then 1.
pub fn generate_ngrams<T: Clone>(terms: &[T]) -> Vec<Vec<T>> {
    (1..=MAX_NGRAM)
        .rev()
        .flat_map(|n| combinations(terms, n))
        .collect()
}

/// The `n`-combinations of `texts` whose space-joined text appears verbatim in `phrase`.
///
/// Deduplicated, first occurrence order.
pub fn applicable_subphrases(texts: &[String], n: usize, phrase: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    combinations(texts, n)
        .into_iter()
        .map(|combo| combo.join(" "))
        .filter(|joined| phrase.contains(joined.as_str()))
        .filter(|joined| seen.insert(joined.clone()))
        .collect()
}
