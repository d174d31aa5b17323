// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel line parsing.
//!
//! Stemming dominates ingestion cost and every line is independent, so lines
//! are parsed with rayon's `par_iter()`. Results come back in input order;
//! adding them to the index stays sequential.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{parse_line, LineError, SourceLine};
use crate::index::IndexEntry;
use crate::stem::StemmerRegistry;

/// Parse every line, preserving order.
pub fn parse_lines(lines: &[SourceLine], stemmers: &StemmerRegistry) -> Vec<Result<IndexEntry, LineError>> {
    #[cfg(feature = "parallel")]
    {
        lines
            .par_iter()
            .map(|l| parse_line(&l.text, l.number, stemmers))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        lines
            .iter()
            .map(|l| parse_line(&l.text, l.number, stemmers))
            .collect()
    }
}

/// Parse every line in parallel, advancing `progress` as lines complete.
#[cfg(feature = "parallel")]
pub fn parse_lines_with_progress(
    lines: &[SourceLine],
    stemmers: &StemmerRegistry,
    progress: &ProgressBar,
) -> Vec<Result<IndexEntry, LineError>> {
    let counter = AtomicUsize::new(0);
    let total = lines.len();

    lines
        .par_iter()
        .map(|l| {
            let parsed = parse_line(&l.text, l.number, stemmers);

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            if count % 1024 == 0 || count == total {
                progress.set_position(count as u64);
            }
            parsed
        })
        .collect()
}
