// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) and length-prefixed string decoding.
//!
//! Record lines and string lengths in `.taxon` files are varints. Decoding
//! garbage must return Err, never panic, and valid decodes must round trip.

#![no_main]

use libfuzzer_sys::fuzz_target;
use taxon::binary::{decode_string, decode_varint, encode_string, encode_varint, MAX_VARINT_BYTES};

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = decode_varint(data) {
        assert!(consumed >= 1 && consumed <= MAX_VARINT_BYTES);
        assert!(consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            decode_varint(&reencoded).expect("re-encoded varint decodes");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());
    }

    if let Ok((text, consumed)) = decode_string(data) {
        assert!(consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_string(&text, &mut reencoded);
        let (again, _) = decode_string(&reencoded).expect("re-encoded string decodes");
        assert_eq!(text, again);
    }
});
