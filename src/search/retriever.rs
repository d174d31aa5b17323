// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate retrieval with a per-tuple cache.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::cache::QueryCache;
use crate::index::{PhraseIndex, PhraseRecord};
use crate::query::Term;

/// Default cap on candidates returned per tuple.
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 25;

/// Retrieval counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrievalStats {
    /// Searches that reached the index.
    pub index_lookups: u64,
    /// Tuples answered from the cache.
    pub cache_hits: u64,
    /// Tuples currently cached.
    pub cached_tuples: usize,
}

/// Fetches candidate records for a term tuple.
///
/// The cache key is the tuple's term texts; stems are derived from them, so
/// they add nothing to the key.
#[derive(Debug)]
pub struct CandidateRetriever {
    cache: QueryCache<Vec<String>, Arc<PhraseRecord>>,
    limit: usize,
    index_lookups: AtomicU64,
    cache_hits: AtomicU64,
}

impl CandidateRetriever {
    pub fn new(capacity: NonZeroUsize, limit: usize) -> Self {
        Self {
            cache: QueryCache::new(capacity),
            limit,
            index_lookups: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Candidates whose consecutive tokens prefix-match `tuple`, at most `limit`.
    ///
    /// Repeated tuples are served from the cache. An empty result clears the
    /// cache rather than being stored.
    pub fn retrieve<I>(&self, index: &I, tuple: &[Term]) -> Arc<Vec<Arc<PhraseRecord>>>
    where
        I: PhraseIndex + ?Sized,
    {
        let key: Vec<String> = tuple.iter().map(|t| t.text.clone()).collect();
        let lookup = self.cache.get_or_compute(key, || {
            self.index_lookups.fetch_add(1, Ordering::Relaxed);
            index.search(tuple, self.limit)
        });

        if lookup.hit {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else if lookup.value.is_empty() {
            tracing::trace!(?tuple, "no candidates, retrieval cache cleared");
        }
        lookup.value
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn stats(&self) -> RetrievalStats {
        RetrievalStats {
            index_lookups: self.index_lookups.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cached_tuples: self.cache.len(),
        }
    }
}
