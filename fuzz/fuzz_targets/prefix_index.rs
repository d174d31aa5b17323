// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for PrefixIndex insertion and lookup.
//!
//! Arbitrary Unicode phrases at arbitrary depths: every stored phrase must be
//! reachable from its own normalized text, and functional insertion must
//! leave the source index alone.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use taxon::{normalize, PrefixIndex};

#[derive(Arbitrary, Debug)]
struct Input {
    depth: u8,
    phrases: Vec<String>,
    extra: String,
}

fuzz_target!(|input: Input| {
    let depth = usize::from(input.depth % 16);
    let index = PrefixIndex::from_phrases(&input.phrases, depth);

    for phrase in &input.phrases {
        let normalized = normalize(phrase);
        if normalized.is_empty() {
            continue;
        }
        assert!(index.contains(&normalized), "lost {:?}", normalized);
    }

    let before = index.len();
    let next = index.with_inserted(&input.extra);
    assert_eq!(index.len(), before);
    assert!(next.len() >= before);
});
