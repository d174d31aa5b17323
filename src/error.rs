// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Only construction and storage can fail. Lookups on missing prefixes return
//! empty results, scoring guards return [`crate::scoring::REJECTED`], and
//! malformed vocabulary lines are skipped (see [`crate::build::LineError`]).

use std::io;

/// Errors surfaced by index construction, storage and configuration.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Prefix index depth must be non-negative.
    #[error("prefix index max depth must be a non-negative integer, got {0}")]
    InvalidDepth(i64),

    /// Reading or writing an index file failed.
    #[error("index I/O error: {0}")]
    Io(#[from] io::Error),

    /// An index file failed validation (magic, version, checksum or record layout).
    #[error("corrupt index file: {0}")]
    CorruptIndex(String),

    /// A record holds a string longer than the file format can store.
    #[error("record at line {line} is {len} bytes, over the {limit}-byte string limit")]
    RecordTooLarge { line: u64, len: usize, limit: usize },

    /// `open` was asked for an index that does not exist in the storage.
    #[error("index `{0}` does not exist")]
    IndexNotFound(String),

    /// Configuration values are out of range or unknown.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid JSON.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
