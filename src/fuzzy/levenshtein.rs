// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance with an early-exit optimization.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance. When a caller only
//! cares whether a distance beats some current best, that bound (and the row
//! minimum of the DP) lets us bail out before finishing the O(nm) table.

/// Levenshtein distance between two strings, counted in characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut dp: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != *bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
        }
    }

    dp[b_chars.len()]
}

/// Levenshtein distance if it is at most `max`, `None` otherwise.
///
/// Two early-exit paths:
/// 1. If the length difference exceeds `max`, return immediately
/// 2. If the minimum value of a DP row exceeds `max`, abandon the table
pub fn levenshtein_bounded(a: &str, b: &str, max: usize) -> Option<usize> {
    // Use character counts, not byte lengths, for Unicode correctness
    let a_len = a.chars().count();
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();

    if a_len.abs_diff(b_len) > max {
        return None;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != *bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > max {
            return None;
        }
    }

    (dp[b_len] <= max).then_some(dp[b_len])
}

/// Smallest edit distance between `target` and any of `others`.
///
/// Each comparison is bounded by the best distance seen so far, so long lists
/// of unrelated phrases are rejected cheaply. Returns `None` for an empty list.
pub fn min_levenshtein<'a, I>(target: &str, others: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<usize> = None;
    for other in others {
        let distance = match best {
            Some(0) => return Some(0),
            Some(bound) => levenshtein_bounded(target, other, bound - 1),
            None => Some(levenshtein(target, other)),
        };
        if let Some(distance) = distance {
            best = Some(distance);
        }
    }
    best
}
