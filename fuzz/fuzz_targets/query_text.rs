// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for end-to-end query resolution.
//!
//! Query text is user input: it may hold regex metacharacters, combining
//! marks or control characters. Resolution must never panic, results must be
//! unique vocabulary phrases with positive scores, and a repeated query must
//! return the same results.

#![no_main]

use std::sync::LazyLock;

use libfuzzer_sys::fuzz_target;
use taxon::testing::sample_matcher;
use taxon::PhraseMatcher;

static MATCHER: LazyLock<PhraseMatcher> = LazyLock::new(sample_matcher);

fuzz_target!(|data: &[u8]| {
    let Ok(query) = std::str::from_utf8(data) else {
        return;
    };
    if query.len() > 256 {
        return;
    }

    let first = MATCHER.run_query_scored(query);
    let mut seen = std::collections::HashSet::new();
    for scored in first.iter() {
        assert!(scored.score > 0.0);
        assert!(seen.insert(scored.phrase.as_str()));
    }

    let second = MATCHER.run_query_scored(query);
    assert_eq!(*first, *second);
});
