//! What a query resolves to, and in which order.

use crate::common::{make_matcher, phrases, sample_matcher, BREAKFAST_QUERY};

#[test]
fn test_inflected_query_finds_plural() {
    let matcher = sample_matcher();
    let results = matcher.run_query("pancake");
    assert!(!results.is_empty());
    assert!(results.contains(&"pancakes".to_string()));
}

#[test]
fn test_sentence_with_two_phrases() {
    let matcher = sample_matcher();
    let results = matcher.run_query(BREAKFAST_QUERY);
    assert!(results.contains(&"pancakes".to_string()), "{:?}", results);
    assert!(results.contains(&"lemon juice".to_string()), "{:?}", results);
}

#[test]
fn test_direct_match_outscores_fuzzy_match() {
    let matcher = make_matcher(&["green tea", "green teas"]);
    let scored = matcher.run_query_scored("green tea");
    assert_eq!(scored[0].phrase, "green tea");
    assert_eq!(scored[0].score, 4000.0);
    assert!(scored.iter().all(|s| s.phrase != "green teas" || s.score < 4000.0));
}

#[test]
fn test_best_score_kept_per_phrase() {
    let matcher = sample_matcher();
    let scored = matcher.run_query_scored("lemon juice");
    let juice: Vec<_> = scored.iter().filter(|s| s.phrase == "lemon juice").collect();
    assert_eq!(juice.len(), 1);
    assert_eq!(juice[0].score, 4000.0);
    assert_eq!(juice[0].terms, vec!["lemon", "juice"]);
}

#[test]
fn test_scores_strictly_positive() {
    let matcher = sample_matcher();
    for query in ["strawbery jam", "dark choclate", "buttermilk pancake", BREAKFAST_QUERY] {
        for scored in matcher.run_query_scored(query).iter() {
            assert!(scored.score > 0.0, "{}: {:?}", query, scored);
        }
    }
}

#[test]
fn test_first_seen_order() {
    // Three-term tuples run first, so the longer phrase surfaces before the
    // shorter one even though both are direct matches.
    let matcher = make_matcher(&["tea", "iced tea biscuits"]);
    let scored = matcher.run_query_scored("iced tea biscuits");
    assert_eq!(phrases(&scored), vec!["iced tea biscuits", "tea"]);
}

#[test]
fn test_diacritics_in_query() {
    let matcher = sample_matcher();
    assert!(matcher
        .run_query("creme brulee please")
        .contains(&"crème brûlée".to_string()));
    assert!(matcher
        .run_query("CRÈME BRÛLÉE")
        .contains(&"crème brûlée".to_string()));
}

#[test]
fn test_truncated_word() {
    let matcher = make_matcher(&["strawberries", "maple syrup"]);
    assert_eq!(matcher.run_query("strawberri"), vec!["strawberries"]);
}
