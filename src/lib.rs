// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy resolution of free text against a controlled vocabulary of phrases.
//!
//! Given a sentence like "pancake with lemon juice" and a vocabulary of
//! canonical phrases ("lemon juice", "pancakes", ...), taxon returns the
//! phrases the text mentions, tolerating inflection, misspelling, truncation
//! and word order differences.
//!
//! # Architecture
//!
//! ```text
//! query ──▶ normalize ──▶ QueryDecomposer ──▶ term tuples (n = 3, 2, 1)
//!                                                  │
//!                                                  ▼
//!             PhraseIndex ◀── CandidateRetriever (per-tuple LRU cache)
//!          (TrieIndex over                         │
//!           PrefixIndex)                           ▼
//!                                           CandidateScorer
//!                                                  │
//!                                                  ▼
//!                        PhraseMatcher (best score per phrase, query cache)
//! ```
//!
//! | Module     | Role                                                    |
//! |------------|---------------------------------------------------------|
//! | `index`    | bounded-depth prefix trie, in-memory index, storage      |
//! | `binary`   | `.taxon` file format (header, varint records, CRC32)     |
//! | `query`    | tokenization, n-gram combinations, subphrases            |
//! | `scoring`  | guard/accumulate heuristic and candidate selection       |
//! | `search`   | retrieval cache, aggregation, whole-query cache          |
//! | `build`    | vocabulary ingestion (parallel with `parallel` feature)  |
//! | `stem`     | per-language Snowball stemmers                           |
//!
//! # Usage
//!
//! ```
//! use taxon::{IndexEntry, MatcherConfig, PhraseMatcher};
//!
//! let entries = vec![
//!     IndexEntry::new("lemon juice", "lemon juic", 1),
//!     IndexEntry::new("pancakes", "pancak", 2),
//! ];
//! let matcher = PhraseMatcher::from_entries(entries, &MatcherConfig::default()).unwrap();
//!
//! let phrases = matcher.run_query("pancakes with lemon juice");
//! assert!(phrases.contains(&"lemon juice".to_string()));
//! assert!(phrases.contains(&"pancakes".to_string()));
//! ```

pub mod binary;
pub mod build;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod logging;
pub mod query;
pub mod scoring;
pub mod search;
pub mod stem;
pub mod util;

pub mod testing;

pub use config::MatcherConfig;
pub use error::{Error, Result};
pub use index::{IndexEntry, IndexStorage, PhraseIndex, PhraseRecord, PrefixIndex, StorageKind, TrieIndex};
pub use query::{DecomposedQuery, QueryDecomposer, Term};
pub use scoring::{CandidateScorer, ScoringWeights, TermTuple};
pub use search::{CandidateRetriever, MatcherStats, PhraseMatcher, ScoredPhrase};
pub use stem::{stemmer_for, Stemmer};
pub use util::normalize;
