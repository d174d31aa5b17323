// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for `.taxon` index file decoding.
//!
//! Index files come from disk and are treated as untrusted. Decoding must not
//! panic or allocate unboundedly, and anything that decodes must re-encode to
//! an equivalent file.

#![no_main]

use libfuzzer_sys::fuzz_target;
use taxon::binary::IndexFile;

fuzz_target!(|data: &[u8]| {
    let Ok(file) = IndexFile::from_bytes(data) else {
        return;
    };

    let bytes = file.to_bytes().expect("decoded file re-encodes");
    let again = IndexFile::from_bytes(&bytes).expect("re-encoded file decodes");
    assert_eq!(file, again);
});
