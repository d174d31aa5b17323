// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring: how a retrieved candidate earns its number.
//!
//! Verbatim matches dominate, guards reject structurally wrong candidates
//! outright, and everything else is a sum of character alignment rewards and
//! edit distance penalties.

mod candidate;
mod core;

pub use candidate::{Candidate, CandidateScorer, TermTuple};
pub use core::*;
