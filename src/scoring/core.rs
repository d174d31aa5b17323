// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The numbers behind candidate ranking.
//!
//! A candidate that appears verbatim in the query dominates everything else.
//! Its score grows with the square of the tuple length, so a verbatim
//! three-word phrase beats any verbatim two-word phrase. Fuzzy scores grow
//! a few points per character, so very long words could otherwise climb past
//! the direct boost; they are clamped one point below it.
//!
//! # Key Invariant: Direct Match Dominance
//!
//! ```text
//! |tuple|² × DIRECT_MATCH_BOOST  >  fuzzy score for the same tuple
//!
//! fuzzy = min(raw fuzzy, |tuple|² × DIRECT_MATCH_BOOST − 1)
//! ```
//!
//! # Constants
//!
//! | Weight                  | Value  | Effect |
//! |-------------------------|--------|--------|
//! | DIRECT_MATCH_BOOST      | 1000.0 | Verbatim candidate, scaled by \|tuple\|² |
//! | SENTENCE_MATCH_BOOST    | 1.0    | Per aligned character, query vs candidate |
//! | SENTENCE_MISMATCH       | 2.0    | Per edit to the closest applicable subphrase |
//! | WORD_ALIGNMENT_BOOST    | 2.0    | Per aligned character, word vs word |
//! | WORD_ALIGNMENT_PENALTY  | 3.0    | Per edit, word vs word |

use serde::{Deserialize, Serialize};

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// Multiplier for candidates that appear verbatim in the query.
pub const DIRECT_MATCH_BOOST: f64 = 1000.0;

/// Reward per position where query and candidate share a character.
pub const SENTENCE_MATCH_BOOST: f64 = 1.0;

/// Penalty per edit between the candidate and the closest applicable subphrase.
pub const SENTENCE_MISMATCH_PENALTY: f64 = 2.0;

/// Reward per aligned character between a query term and a candidate word.
pub const WORD_ALIGNMENT_BOOST: f64 = 2.0;

/// Penalty per edit between a query term and a candidate word.
pub const WORD_ALIGNMENT_PENALTY: f64 = 3.0;

/// Score of a candidate that failed a guard. Never selected.
pub const REJECTED: f64 = f64::NEG_INFINITY;

/// Filler aligned against missing words when term and word counts differ.
pub const WILDCARD: &str = "*";

// =============================================================================
// WEIGHTS
// =============================================================================

/// Tunable scoring weights. Defaults are the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub direct_match_boost: f64,
    pub sentence_match_boost: f64,
    pub sentence_mismatch_penalty: f64,
    pub word_alignment_boost: f64,
    pub word_alignment_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            direct_match_boost: DIRECT_MATCH_BOOST,
            sentence_match_boost: SENTENCE_MATCH_BOOST,
            sentence_mismatch_penalty: SENTENCE_MISMATCH_PENALTY,
            word_alignment_boost: WORD_ALIGNMENT_BOOST,
            word_alignment_penalty: WORD_ALIGNMENT_PENALTY,
        }
    }
}

impl ScoringWeights {
    /// Score for a verbatim match of a tuple with `tuple_len` terms.
    #[inline]
    pub fn direct_match(&self, tuple_len: usize) -> f64 {
        (tuple_len * tuple_len) as f64 * self.direct_match_boost
    }

    /// Highest score a fuzzy candidate may reach for a tuple of `tuple_len` terms.
    #[inline]
    pub fn fuzzy_ceiling(&self, tuple_len: usize) -> f64 {
        self.direct_match(tuple_len) - 1.0
    }

    /// Every weight is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [
            self.direct_match_boost,
            self.sentence_match_boost,
            self.sentence_mismatch_penalty,
            self.word_alignment_boost,
            self.word_alignment_penalty,
        ]
        .iter()
        .all(|w| w.is_finite() && *w >= 0.0)
    }
}

/// Did this candidate fail a guard?
#[inline]
pub fn is_rejected(score: f64) -> bool {
    score == REJECTED
}
