//! Scoring invariants over long and short words.

use proptest::prelude::*;

use taxon::scoring::{is_rejected, DIRECT_MATCH_BOOST};
use taxon::{CandidateScorer, TermTuple};

use crate::common::make_matcher;

fn long_word() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z]{1,12}").unwrap(),
        (1usize..900, prop::char::range('a', 'z')).prop_map(|(n, c)| c.to_string().repeat(n)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: a verbatim candidate outscores any fuzzy candidate for the same tuple.
    #[test]
    fn prop_direct_match_dominates(
        words in prop::collection::vec(long_word(), 1..=3),
        suffix in "[a-z]{1,2}",
    ) {
        let scorer = CandidateScorer::default();
        let tuple = TermTuple::new(words.clone()).unwrap();
        let query = words.join(" ");
        let fuzzy_candidate = words
            .iter()
            .map(|w| format!("{w}{suffix}"))
            .collect::<Vec<_>>()
            .join(" ");

        let direct = scorer.score(&query, &tuple, &[], &query);
        let fuzzy = scorer.score(&fuzzy_candidate, &tuple, &[query.clone()], &query);

        prop_assert_eq!(direct, (words.len() * words.len()) as f64 * DIRECT_MATCH_BOOST);
        prop_assert!(!is_rejected(fuzzy));
        prop_assert!(fuzzy < direct, "fuzzy {} >= direct {}", fuzzy, direct);
    }

    /// Property: a long near-miss word never reaches the direct score through the matcher.
    #[test]
    fn prop_long_near_miss_below_direct(len in 100usize..900, c in prop::char::range('a', 'z')) {
        let word = c.to_string().repeat(len);
        let near_miss = format!("{word}x");
        let matcher = make_matcher(&[near_miss.as_str()]);

        for result in matcher.run_query_scored(&word).iter() {
            prop_assert!(result.score < DIRECT_MATCH_BOOST, "{} scored {}", result.phrase, result.score);
        }
    }
}
