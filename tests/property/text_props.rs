//! Normalization, edit distance and decomposition invariants.

use proptest::prelude::*;
use taxon::fuzzy::{levenshtein, levenshtein_bounded};
use taxon::normalize;
use taxon::query::{combinations, generate_ngrams};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: normalize(normalize(x)) == normalize(x).
    #[test]
    fn prop_normalize_idempotent(text in "[ \\ta-zA-ZàéèüÅÖçÇß'.,-]{0,40}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Property: normalized text has no leading, trailing or doubled spaces.
    #[test]
    fn prop_normalize_whitespace(text in "[ \\tA-Za-zé]{0,30}") {
        let normalized = normalize(&text);
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
        prop_assert!(!normalized.contains("  "));
    }

    /// Property: levenshtein is symmetric and zero exactly on equality.
    #[test]
    fn prop_levenshtein_metric(a in "[a-e]{0,8}", b in "[a-e]{0,8}") {
        let d = levenshtein(&a, &b);
        prop_assert_eq!(d, levenshtein(&b, &a));
        prop_assert_eq!(d == 0, a == b);
        prop_assert!(d >= a.chars().count().abs_diff(b.chars().count()));
    }

    /// Property: the bounded variant agrees with the full distance.
    #[test]
    fn prop_bounded_agrees(a in "[a-e]{0,8}", b in "[a-e]{0,8}", max in 0usize..10) {
        let d = levenshtein(&a, &b);
        let expected = (d <= max).then_some(d);
        prop_assert_eq!(levenshtein_bounded(&a, &b, max), expected);
    }

    /// Property: n-gram tuples keep query order and count C(len, n).
    #[test]
    fn prop_ngrams_ordered(len in 0usize..9) {
        let terms: Vec<usize> = (0..len).collect();
        for tuple in generate_ngrams(&terms) {
            prop_assert!(tuple.windows(2).all(|w| w[0] < w[1]));
            prop_assert!((1..=3).contains(&tuple.len()));
        }
        let c2 = combinations(&terms, 2).len();
        prop_assert_eq!(c2, len * len.saturating_sub(1) / 2);
    }
}
