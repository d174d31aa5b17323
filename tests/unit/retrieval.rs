//! Candidate retrieval through the PhraseIndex seam.

use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;

use taxon::index::PhraseIndex;
use taxon::search::DEFAULT_RETRIEVAL_LIMIT;
use taxon::{CandidateRetriever, MatcherConfig, PhraseMatcher, Term, TrieIndex};

use crate::common::{make_entries, CountingIndex, SAMPLE_VOCABULARY};

fn counting_index() -> CountingIndex {
    CountingIndex::new(TrieIndex::from_entries(make_entries(SAMPLE_VOCABULARY), 3))
}

#[test]
fn test_retriever_caches_per_tuple() {
    let index = counting_index();
    let retriever = CandidateRetriever::new(NonZeroUsize::new(16).unwrap(), DEFAULT_RETRIEVAL_LIMIT);

    let tea = [Term::plain("tea")];
    let first = retriever.retrieve(&index, &tea);
    let second = retriever.retrieve(&index, &tea);
    assert!(!first.is_empty());
    assert_eq!(first.len(), second.len());
    assert_eq!(index.searches(), 1);

    retriever.retrieve(&index, &[Term::plain("lemon")]);
    assert_eq!(index.searches(), 2);
}

#[test]
fn test_retrieval_limit_caps_candidates() {
    let phrases: Vec<String> = (0..40).map(|i| format!("tea blend {i}")).collect();
    let refs: Vec<&str> = phrases.iter().map(String::as_str).collect();
    let index = TrieIndex::from_entries(make_entries(&refs), 3);

    assert_eq!(index.search(&[Term::plain("tea")], DEFAULT_RETRIEVAL_LIMIT).len(), 25);

    let retriever = CandidateRetriever::new(NonZeroUsize::new(4).unwrap(), 5);
    assert_eq!(retriever.retrieve(&index, &[Term::plain("tea")]).len(), 5);
}

#[test]
fn test_repeated_query_skips_retrieval() {
    let index = counting_index();
    let searches = index.counter();
    let matcher = PhraseMatcher::new(index, &MatcherConfig::default()).unwrap();

    let first = matcher.run_query("pancakes with maple syrup");
    let after_first = searches.load(Ordering::SeqCst);
    assert!(after_first > 0);

    let second = matcher.run_query("pancakes with maple syrup");
    assert_eq!(first, second);
    assert_eq!(searches.load(Ordering::SeqCst), after_first);
}

#[test]
fn test_clear_caches_forces_retrieval() {
    let index = counting_index();
    let searches = index.counter();
    let matcher = PhraseMatcher::new(index, &MatcherConfig::default()).unwrap();

    matcher.run_query("green tea");
    let after_first = searches.load(Ordering::SeqCst);

    matcher.clear_caches();
    matcher.run_query("green tea");
    assert!(searches.load(Ordering::SeqCst) > after_first);
}
