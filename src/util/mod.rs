// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by indexing and querying.
//!
//! Everything that touches the vocabulary or a query goes through
//! [`normalize`] first, so the index and the scorer always agree on what a
//! phrase looks like.

pub mod normalize;

pub use normalize::*;
