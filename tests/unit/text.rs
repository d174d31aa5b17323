//! Normalization, edit distance and stemming.

use taxon::fuzzy::{levenshtein, levenshtein_bounded, min_levenshtein};
use taxon::stem::{is_supported, StemmerRegistry};
use taxon::util::aligned_matches;
use taxon::{normalize, stemmer_for};

#[test]
fn test_normalize_examples() {
    assert_eq!(normalize("  Lemon\tJUICE \n"), "lemon juice");
    assert_eq!(normalize("Crème Brûlée"), "creme brulee");
    assert_eq!(normalize("ÅNGSTRÖM"), "angstrom");
    assert_eq!(normalize(""), "");
}

#[test]
fn test_normalize_keeps_punctuation() {
    // Tokenization, not normalization, drops punctuation.
    assert_eq!(normalize("tea, please!"), "tea, please!");
}

#[test]
fn test_aligned_matches_counts_positions() {
    assert_eq!(aligned_matches("pancake", "pancakes"), 7);
    assert_eq!(aligned_matches("abc", "xbc"), 2);
    assert_eq!(aligned_matches("", "abc"), 0);
}

#[test]
fn test_levenshtein_examples() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("pancake", "pancakes"), 1);
    assert_eq!(levenshtein("", "tea"), 3);
    assert_eq!(levenshtein("brûlée", "brulee"), 2);
}

#[test]
fn test_bounded_agrees_when_within() {
    assert_eq!(levenshtein_bounded("kitten", "sitting", 3), Some(3));
    assert_eq!(levenshtein_bounded("kitten", "sitting", 2), None);
    assert_eq!(levenshtein_bounded("a", "abcdef", 2), None);
}

#[test]
fn test_min_levenshtein() {
    let subphrases = ["lemon juice", "juice", "lemon"];
    assert_eq!(min_levenshtein("lemon juices", subphrases), Some(1));
    assert_eq!(min_levenshtein("lemon", subphrases), Some(0));
    assert_eq!(min_levenshtein("tea", std::iter::empty()), None);
}

#[test]
fn test_stemmer_selection() {
    let english = stemmer_for(Some("en"));
    let fallback = stemmer_for(Some("xx"));
    assert_eq!(fallback.stem("Pancakes"), "pancakes");

    if is_supported("en") {
        assert_eq!(english.stem("pancakes"), english.stem("pancake"));
    }
}

#[test]
fn test_registry_normalizes_language_tags() {
    let registry = StemmerRegistry::new();
    let a = registry.get(Some("EN"));
    let b = registry.get(Some(" en "));
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}
