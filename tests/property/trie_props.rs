//! PrefixIndex invariants.
//!
//! - every prefix of a stored phrase reaches it, at any depth
//! - functional insertion never mutates the source
//! - prefixes within the depth bound return only phrases that start with them

use proptest::prelude::*;
use taxon::PrefixIndex;

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}").unwrap()
}

fn phrase_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..4).prop_map(|words| words.join(" "))
}

fn vocabulary_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(phrase_strategy(), 1..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: get_prefix_matches(p[..k]) contains p for every k ≤ len(p).
    #[test]
    fn prop_prefixes_reach_phrase(phrases in vocabulary_strategy(), depth in 0usize..8) {
        let index = PrefixIndex::from_phrases(&phrases, depth);
        for phrase in &phrases {
            for k in 0..=phrase.len() {
                let matches = index.get_prefix_matches(&phrase[..k]);
                prop_assert!(
                    matches.contains(phrase),
                    "depth {}: prefix {:?} lost {:?}",
                    depth, &phrase[..k], phrase
                );
            }
        }
    }

    /// Property: with_inserted leaves the source unchanged.
    #[test]
    fn prop_functional_insert_is_pure(
        phrases in vocabulary_strategy(),
        extra in phrase_strategy(),
        depth in 0usize..6,
    ) {
        let base = PrefixIndex::from_phrases(&phrases, depth);
        let len = base.len();
        let before = base.phrases();
        let was_present = base.contains(&extra);

        let next = base.with_inserted(&extra);

        prop_assert_eq!(base.len(), len);
        prop_assert_eq!(base.phrases(), before);
        prop_assert_eq!(base.contains(&extra), was_present);
        prop_assert!(next.contains(&extra));
        prop_assert_eq!(next.len(), len + usize::from(!was_present));
    }

    /// Property: in-place and functional insertion build the same index.
    #[test]
    fn prop_insert_modes_agree(phrases in vocabulary_strategy(), depth in 0usize..6) {
        let mut in_place = PrefixIndex::with_depth(depth);
        let mut functional = PrefixIndex::with_depth(depth);
        for phrase in &phrases {
            in_place.insert(phrase);
            functional = functional.with_inserted(phrase);
        }
        prop_assert_eq!(in_place.phrases(), functional.phrases());
    }

    /// Property: short prefixes are exact.
    #[test]
    fn prop_short_prefix_exact(phrases in vocabulary_strategy(), prefix in "[a-z]{0,3}") {
        let index = PrefixIndex::from_phrases(&phrases, 3);
        let mut expected: Vec<&String> = phrases.iter().filter(|p| p.starts_with(&prefix)).collect();
        expected.sort();
        expected.dedup();

        let mut actual = index.get_prefix_matches(&prefix);
        actual.sort();
        prop_assert_eq!(actual.iter().collect::<Vec<_>>(), expected);
    }

    /// Property: len counts distinct phrases.
    #[test]
    fn prop_len_counts_distinct(phrases in vocabulary_strategy(), depth in 0usize..6) {
        let index = PrefixIndex::from_phrases(&phrases, depth);
        let mut distinct = phrases.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(index.len(), distinct.len());
    }
}

#[test]
fn test_negative_depths_fail() {
    for depth in [-1i64, -7, i64::MIN] {
        assert!(PrefixIndex::with_max_depth(depth).is_err());
    }
    assert!(PrefixIndex::with_max_depth(0).is_ok());
    assert!(PrefixIndex::with_max_depth(10_000).is_ok());
}
