//! Query tokenization and term tuple generation.

use taxon::query::{applicable_subphrases, combinations, generate_ngrams, tokenize, MAX_NGRAM};
use taxon::{stemmer_for, QueryDecomposer};

fn decomposer() -> QueryDecomposer {
    QueryDecomposer::new(stemmer_for(Some("en")))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_tokenize_drops_punctuation() {
    assert_eq!(tokenize("tea, milk & honey!"), vec!["tea", "milk", "honey"]);
    assert_eq!(tokenize("1.5 cups"), vec!["1.5", "cups"]);
    assert_eq!(tokenize("baker's dozen"), vec!["baker's", "dozen"]);
    assert!(tokenize("?! ... --").is_empty());
}

#[test]
fn test_decompose_keeps_duplicates() {
    let query = decomposer().decompose("Tea  TEA tea");
    assert_eq!(query.texts(), vec!["tea", "tea", "tea"]);
    assert_eq!(query.phrase, "tea tea tea");
    assert_eq!(query.normalized, "tea tea tea");
}

#[test]
fn test_decompose_stems_each_term() {
    let query = decomposer().decompose("Juicy Pancakes");
    assert_eq!(query.terms.len(), 2);
    for term in &query.terms {
        assert!(!term.stem.is_empty());
        assert_eq!(term.stem, term.stem.to_lowercase());
    }
}

#[test]
fn test_decompose_empty() {
    assert!(decomposer().decompose("").is_empty());
    assert!(decomposer().decompose("?!").is_empty());
}

#[test]
fn test_combination_counts() {
    let items: Vec<usize> = (0..6).collect();
    assert_eq!(combinations(&items, 1).len(), 6);
    assert_eq!(combinations(&items, 2).len(), 15);
    assert_eq!(combinations(&items, 3).len(), 20);
    assert!(combinations(&items, 7).is_empty());
}

#[test]
fn test_ngrams_longest_first() {
    let terms = strings(&["juice", "of", "lemons"]);
    let ngrams = generate_ngrams(&terms);
    assert_eq!(ngrams.len(), 1 + 3 + 3);
    assert_eq!(ngrams[0].len(), MAX_NGRAM);
    assert!(ngrams.contains(&strings(&["juice", "lemons"])));
    assert!(ngrams.windows(2).all(|w| w[0].len() >= w[1].len()));
}

#[test]
fn test_subphrases_only_verbatim() {
    let texts = strings(&["lemon", "juice", "sugar"]);
    let phrase = "lemon juice sugar";
    assert_eq!(
        applicable_subphrases(&texts, 2, phrase),
        strings(&["lemon juice", "juice sugar"])
    );
    assert_eq!(applicable_subphrases(&texts, 3, phrase), strings(&[phrase]));
}
