//! End-to-end matcher invariants over random queries.

use proptest::prelude::*;

use crate::common::{sample_matcher, SAMPLE_VOCABULARY};

fn query_strategy() -> impl Strategy<Value = String> {
    let vocabulary_word = prop::sample::select(
        SAMPLE_VOCABULARY
            .iter()
            .flat_map(|p| p.split(' '))
            .collect::<Vec<_>>(),
    )
    .prop_map(str::to_string);
    let noise = prop::string::string_regex("[a-z]{1,6}").unwrap();
    prop::collection::vec(prop_oneof![vocabulary_word, noise], 0..7).prop_map(|w| w.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: results are unique, positive and drawn from the vocabulary.
    #[test]
    fn prop_results_well_formed(query in query_strategy()) {
        let matcher = sample_matcher();
        let scored = matcher.run_query_scored(&query);

        let mut seen = std::collections::HashSet::new();
        for result in scored.iter() {
            prop_assert!(result.score > 0.0);
            prop_assert!(seen.insert(result.phrase.clone()), "duplicate {:?}", result.phrase);
            prop_assert!(SAMPLE_VOCABULARY.contains(&result.phrase.as_str()));
        }
    }

    /// Property: a stored phrase typed verbatim is always found.
    #[test]
    fn prop_verbatim_phrase_found(index in 0..SAMPLE_VOCABULARY.len(), prefix in "[a-z]{0,5}") {
        let matcher = sample_matcher();
        let phrase = SAMPLE_VOCABULARY[index];
        let query = format!("{} {}", prefix, phrase);
        let results = matcher.run_query(&query);
        prop_assert!(results.iter().any(|r| r == phrase), "{:?} -> {:?}", query, results);
    }

    /// Property: repeating a query returns identical results.
    #[test]
    fn prop_query_deterministic(query in query_strategy()) {
        let matcher = sample_matcher();
        let first = matcher.run_query(&query);
        matcher.clear_caches();
        let second = matcher.run_query(&query);
        prop_assert_eq!(first, second);
    }
}
