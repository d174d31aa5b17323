// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Matcher configuration.
//!
//! Loaded from JSON. Every field has a default, so a config file only needs
//! the values it changes:
//!
//! ```json
//! {
//!   "index": { "kind": "file", "dir": "data", "name": "foods", "max_depth": 3 },
//!   "cache": { "retrieval_capacity": 1024, "result_capacity": 256 },
//!   "retrieval_limit": 25,
//!   "language": "en",
//!   "scoring": { "direct_match_boost": 1000.0 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::index::{StorageKind, DEFAULT_MAX_DEPTH};
use crate::scoring::ScoringWeights;
use crate::search::DEFAULT_RETRIEVAL_LIMIT;
use crate::stem::DEFAULT_LANGUAGE;

// ============================================================================
// DEFAULTS
// ============================================================================

/// Retrieval cache entries (distinct term tuples).
pub const DEFAULT_RETRIEVAL_CACHE_CAPACITY: usize = 1024;

/// Result cache entries (distinct normalized queries).
pub const DEFAULT_RESULT_CACHE_CAPACITY: usize = 256;

/// Index name used when none is configured.
pub const DEFAULT_INDEX_NAME: &str = "vocabulary";

/// Directory for file-backed indexes.
pub const DEFAULT_INDEX_DIR: &str = ".taxon";

// ============================================================================
// SECTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub kind: StorageKind,
    pub dir: PathBuf,
    pub name: String,
    /// Signed; negative values are reported as [`Error::InvalidDepth`].
    pub max_depth: i64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::File,
            dir: PathBuf::from(DEFAULT_INDEX_DIR),
            name: DEFAULT_INDEX_NAME.to_string(),
            max_depth: DEFAULT_MAX_DEPTH as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub retrieval_capacity: usize,
    pub result_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            retrieval_capacity: DEFAULT_RETRIEVAL_CACHE_CAPACITY,
            result_capacity: DEFAULT_RESULT_CACHE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub index: IndexConfig,
    pub cache: CacheConfig,
    pub retrieval_limit: usize,
    /// Query language for stemming (ISO 639-1).
    pub language: String,
    pub scoring: ScoringWeights,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            index: IndexConfig::default(),
            cache: CacheConfig::default(),
            retrieval_limit: DEFAULT_RETRIEVAL_LIMIT,
            language: DEFAULT_LANGUAGE.to_string(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl MatcherConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.max_depth()?;
        if self.cache.retrieval_capacity == 0 {
            return Err(Error::InvalidConfig(
                "cache.retrieval_capacity must be at least 1".into(),
            ));
        }
        if self.cache.result_capacity == 0 {
            return Err(Error::InvalidConfig(
                "cache.result_capacity must be at least 1".into(),
            ));
        }
        if self.retrieval_limit == 0 {
            return Err(Error::InvalidConfig("retrieval_limit must be at least 1".into()));
        }
        if self.language.trim().is_empty() {
            return Err(Error::InvalidConfig("language must not be empty".into()));
        }
        if !self.scoring.is_valid() {
            return Err(Error::InvalidConfig(
                "scoring weights must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Configured trie depth. Fails with [`Error::InvalidDepth`] when negative.
    pub fn max_depth(&self) -> Result<usize> {
        usize::try_from(self.index.max_depth).map_err(|_| Error::InvalidDepth(self.index.max_depth))
    }
}
