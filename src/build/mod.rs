// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Vocabulary ingestion: tab-separated dictionary file to populated index.
//!
//! The dictionary's first line is a header. Column 1 of every other line holds
//! an entry of the form `lang:word-word-word` (the language prefix is
//! optional). Lines that do not fit are skipped with a warning; they never
//! abort ingestion.

pub mod parallel;

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use serde::Serialize;

use crate::binary::MAX_STRING_LEN;
use crate::config::MatcherConfig;
use crate::error::Result;
use crate::index::{IndexEntry, IndexStorage, PhraseIndex};
use crate::stem::StemmerRegistry;

pub use parallel::parse_lines;
#[cfg(feature = "parallel")]
pub use parallel::parse_lines_with_progress;

/// Tab-separated column holding the entry.
pub const DATA_COLUMN: usize = 1;

static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([^:\s]+):)?([^:]*)$").expect("entry pattern compiles")
});

/// Why a vocabulary line was skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("line {line}: no column {column}")]
    MissingColumn { line: u64, column: usize },

    #[error("line {line}: `{entry}` is not of the form `lang:word-word`")]
    Malformed { line: u64, entry: String },

    #[error("line {line}: entry has no words")]
    NoWords { line: u64 },

    #[error("line {line}: entry is {len} bytes, over the {limit}-byte limit")]
    TooLong { line: u64, len: usize, limit: usize },
}

/// One raw line of the dictionary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: u64,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: u64, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Counts from one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub lines: usize,
    pub indexed: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

/// Split an entry into its optional language tag and its data.
pub fn split_entry(entry: &str) -> Option<(Option<&str>, &str)> {
    let captures = ENTRY_PATTERN.captures(entry)?;
    let language = captures.get(1).map(|m| m.as_str());
    let data = captures.get(2).map_or("", |m| m.as_str());
    Some((language, data))
}

/// Parse one dictionary line into an index entry.
pub fn parse_line(raw: &str, line: u64, stemmers: &StemmerRegistry) -> std::result::Result<IndexEntry, LineError> {
    let entry = raw
        .split('\t')
        .nth(DATA_COLUMN)
        .map(str::trim)
        .ok_or(LineError::MissingColumn {
            line,
            column: DATA_COLUMN,
        })?;

    let (language, data) = split_entry(entry).ok_or_else(|| LineError::Malformed {
        line,
        entry: entry.to_string(),
    })?;

    let words: Vec<&str> = data
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return Err(LineError::NoWords { line });
    }

    let stemmer = stemmers.get(language);
    let stemmed = words
        .iter()
        .map(|w| stemmer.stem(w))
        .collect::<Vec<_>>()
        .join(" ");

    let original = words.join(" ");
    let len = original.len().max(stemmed.len());
    if len > MAX_STRING_LEN {
        return Err(LineError::TooLong {
            line,
            len,
            limit: MAX_STRING_LEN,
        });
    }

    Ok(IndexEntry {
        original,
        stemmed,
        line,
    })
}

/// Read a dictionary file, dropping the header line.
///
/// Invalid UTF-8 is replaced rather than rejected so a single bad byte only
/// affects its own line.
pub fn read_vocabulary(path: &Path) -> Result<Vec<SourceLine>> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text
        .lines()
        .enumerate()
        .skip(1)
        .map(|(number, line)| SourceLine::new(number as u64, line))
        .collect())
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

/// Parse `lines` (in parallel when enabled) and add every valid entry to `index`.
///
/// Entries are added in line order, so ingestion order in the index matches
/// the file regardless of how parsing was scheduled.
pub fn index_vocabulary<I>(lines: &[SourceLine], index: &mut I) -> Result<IngestReport>
where
    I: PhraseIndex + ?Sized,
{
    let stemmers = StemmerRegistry::new();

    #[cfg(feature = "parallel")]
    let parsed = {
        let progress = ProgressBar::new(lines.len() as u64);
        progress.set_style(create_progress_style());
        progress.set_prefix("Parsing");
        let parsed = parse_lines_with_progress(lines, &stemmers, &progress);
        progress.finish_and_clear();
        parsed
    };
    #[cfg(not(feature = "parallel"))]
    let parsed = parse_lines(lines, &stemmers);

    let mut report = IngestReport {
        lines: lines.len(),
        ..IngestReport::default()
    };

    for result in parsed {
        match result {
            Ok(entry) => {
                if index.add(entry)? {
                    report.indexed += 1;
                } else {
                    report.duplicates += 1;
                }
            }
            Err(e) => {
                tracing::warn!("skipping vocabulary {}", e);
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        lines = report.lines,
        indexed = report.indexed,
        duplicates = report.duplicates,
        skipped = report.skipped,
        "vocabulary ingested"
    );
    Ok(report)
}

/// Ingest a dictionary file into the configured index and save it.
///
/// With `rebuild`, any existing index of the configured name is replaced;
/// otherwise entries are appended to it.
pub fn run_index(config: &MatcherConfig, input: &Path, rebuild: bool) -> Result<IngestReport> {
    config.validate()?;
    let storage = IndexStorage::with_kind(config.index.kind, &config.index.dir)?;
    let name = config.index.name.as_str();
    let max_depth = config.max_depth()?;

    let mut index = if rebuild {
        storage.create(name, max_depth)?
    } else {
        storage.open_or_create(name, max_depth)?
    };

    let lines = read_vocabulary(input)?;
    let report = index_vocabulary(&lines, &mut index)?;
    storage.save(name, &index)?;

    if let Some(path) = storage.path_for(name) {
        tracing::info!(path = %path.display(), phrases = index.len(), "index saved");
    }
    Ok(report)
}
