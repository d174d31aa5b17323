// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query resolution: decompose, retrieve, score, aggregate.
//!
//! For every term tuple of a query (longest first) the best candidate is
//! selected; positive winners are collected keeping the highest score seen for
//! each phrase. Phrases come out in the order they were first found, so longer
//! tuples tend to surface first, but a later, higher score does not move a
//! phrase forward.
//!
//! Whole-query results are cached by normalized query text.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use super::cache::QueryCache;
use super::retriever::CandidateRetriever;
use crate::config::MatcherConfig;
use crate::error::{Error, Result};
use crate::index::{IndexEntry, PhraseIndex, TrieIndex};
use crate::query::{applicable_subphrases, generate_ngrams, DecomposedQuery, QueryDecomposer};
use crate::scoring::{CandidateScorer, TermTuple};
use crate::stem::stemmer_for;
use crate::util::normalize;

/// A resolved phrase with its best score and the terms that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPhrase {
    pub phrase: String,
    pub score: f64,
    pub terms: Vec<String>,
}

/// Cache and lookup counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatcherStats {
    pub phrases: usize,
    pub index_lookups: u64,
    pub retrieval_cache_hits: u64,
    pub query_cache_hits: u64,
    pub cached_tuples: usize,
    pub cached_queries: usize,
}

/// Resolves free text against the phrases of an index.
#[derive(Debug)]
pub struct PhraseMatcher<I: PhraseIndex = TrieIndex> {
    index: I,
    decomposer: QueryDecomposer,
    retriever: CandidateRetriever,
    scorer: CandidateScorer,
    results: QueryCache<String, ScoredPhrase>,
    query_hits: AtomicU64,
}

impl<I: PhraseIndex> PhraseMatcher<I> {
    /// Matcher over `index` configured by `config`.
    pub fn new(index: I, config: &MatcherConfig) -> Result<Self> {
        config.validate()?;

        let retrieval_capacity = NonZeroUsize::new(config.cache.retrieval_capacity)
            .ok_or_else(|| Error::InvalidConfig("retrieval cache capacity must be positive".into()))?;
        let result_capacity = NonZeroUsize::new(config.cache.result_capacity)
            .ok_or_else(|| Error::InvalidConfig("result cache capacity must be positive".into()))?;

        Ok(Self {
            index,
            decomposer: QueryDecomposer::new(stemmer_for(Some(&config.language))),
            retriever: CandidateRetriever::new(retrieval_capacity, config.retrieval_limit),
            scorer: CandidateScorer::new(config.scoring),
            results: QueryCache::new(result_capacity),
            query_hits: AtomicU64::new(0),
        })
    }

    /// Matcher with the default configuration.
    pub fn with_defaults(index: I) -> Result<Self> {
        Self::new(index, &MatcherConfig::default())
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn into_index(self) -> I {
        self.index
    }

    pub fn decomposer(&self) -> &QueryDecomposer {
        &self.decomposer
    }

    /// Ranked phrases for a free-text query.
    pub fn run_query(&self, query: &str) -> Vec<String> {
        self.run_query_scored(query)
            .iter()
            .map(|scored| scored.phrase.clone())
            .collect()
    }

    /// Ranked phrases with scores, shared with the result cache.
    pub fn run_query_scored(&self, query: &str) -> Arc<Vec<ScoredPhrase>> {
        let normalized = normalize(query);
        let lookup = self.results.get_or_compute(normalized.clone(), || {
            let decomposed = self.decomposer.decompose_normalized(normalized.clone());
            self.rank(&decomposed)
        });

        if lookup.hit {
            self.query_hits.fetch_add(1, Ordering::Relaxed);
        }
        tracing::debug!(
            query = %normalized,
            results = lookup.value.len(),
            cached = lookup.hit,
            "resolved query"
        );
        lookup.value
    }

    fn rank(&self, query: &DecomposedQuery) -> Vec<ScoredPhrase> {
        let texts = query.texts();
        let mut subphrases: HashMap<usize, Vec<String>> = HashMap::new();
        let mut ranked: Vec<ScoredPhrase> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for tuple in generate_ngrams(&query.terms) {
            let candidates = self.retriever.retrieve(&self.index, &tuple);
            if candidates.is_empty() {
                continue;
            }

            let term_tuple = match TermTuple::from_terms(&tuple) {
                Ok(t) => t,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping tuple with uncompilable pattern");
                    continue;
                }
            };
            let applicable = subphrases
                .entry(tuple.len())
                .or_insert_with(|| applicable_subphrases(&texts, tuple.len(), &query.phrase));

            let Some((record, score)) =
                self.scorer
                    .select_best(candidates.as_slice(), &term_tuple, applicable, &query.phrase)
            else {
                continue;
            };
            if score <= 0.0 {
                continue;
            }

            match positions.get(&record.phrase) {
                Some(&at) => {
                    if score > ranked[at].score {
                        ranked[at].score = score;
                        ranked[at].terms = term_tuple.words().to_vec();
                    }
                }
                None => {
                    positions.insert(record.phrase.clone(), ranked.len());
                    ranked.push(ScoredPhrase {
                        phrase: record.phrase.clone(),
                        score,
                        terms: term_tuple.words().to_vec(),
                    });
                }
            }
        }

        ranked
    }

    /// Drop every cached retrieval and query result.
    pub fn clear_caches(&self) {
        self.retriever.clear();
        self.results.clear();
        tracing::debug!("caches cleared");
    }

    /// Append entries to the index. Clears both caches when anything was stored.
    pub fn add_entries<E>(&mut self, entries: E) -> Result<usize>
    where
        E: IntoIterator<Item = IndexEntry>,
    {
        let mut added = 0;
        for entry in entries {
            if self.index.add(entry)? {
                added += 1;
            }
        }
        if added > 0 {
            self.clear_caches();
        }
        Ok(added)
    }

    /// Is `text`, stemmed word by word with the query stemmer, a stored phrase?
    pub fn contains_phrase(&self, text: &str) -> bool {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return false;
        }
        let stemmed = self.decomposer.stemmer().stem_phrase(&normalized);
        self.index.contains_stemmed(&stemmed)
    }

    pub fn stats(&self) -> MatcherStats {
        let retrieval = self.retriever.stats();
        MatcherStats {
            phrases: self.index.len(),
            index_lookups: retrieval.index_lookups,
            retrieval_cache_hits: retrieval.cache_hits,
            query_cache_hits: self.query_hits.load(Ordering::Relaxed),
            cached_tuples: retrieval.cached_tuples,
            cached_queries: self.results.len(),
        }
    }
}

impl PhraseMatcher<TrieIndex> {
    /// Matcher over an in-memory index of `entries`.
    pub fn from_entries<E>(entries: E, config: &MatcherConfig) -> Result<Self>
    where
        E: IntoIterator<Item = IndexEntry>,
    {
        let index = TrieIndex::from_entries(entries, config.max_depth()?);
        Self::new(index, config)
    }
}
