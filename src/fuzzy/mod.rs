// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! The scorer needs exact distances (they become penalties), so the full
//! Levenshtein is here alongside a bounded variant that gives up as soon as
//! the running best can no longer improve.

mod levenshtein;

pub use levenshtein::*;
