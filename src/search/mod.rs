// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: from free text to ranked vocabulary phrases.
//!
//! [`PhraseMatcher`] owns the index and both caches. Retrieval goes through
//! [`CandidateRetriever`] (per-tuple cache), ranking through the scorer, and
//! whole-query results through the result cache. Both caches are bounded LRU
//! maps behind a mutex, so a matcher can be shared across threads.

pub mod cache;
mod engine;
mod retriever;

pub use cache::{Lookup, QueryCache};
pub use engine::{MatcherStats, PhraseMatcher, ScoredPhrase};
pub use retriever::{CandidateRetriever, RetrievalStats, DEFAULT_RETRIEVAL_LIMIT};
