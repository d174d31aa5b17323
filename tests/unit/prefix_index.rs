//! PrefixIndex behavior across depth bounds.

use taxon::{Error, PrefixIndex};

const WORDS: &[&str] = &["tea", "team", "tease", "teacup", "ten", "t", "toast", "lemon"];

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

#[test]
fn test_negative_depth_rejected() {
    assert!(matches!(PrefixIndex::with_max_depth(-1), Err(Error::InvalidDepth(-1))));
    assert!(matches!(PrefixIndex::with_max_depth(i64::MIN), Err(Error::InvalidDepth(_))));
}

#[test]
fn test_depth_zero_single_bucket_per_first_char() {
    let index = PrefixIndex::from_phrases(WORDS, 0);
    assert_eq!(index.len(), WORDS.len());

    // Everything starting with 't' shares one bucket.
    let bucket = index.get_prefix_matches("tx");
    assert_eq!(bucket.len(), 7);
    assert!(index.get_prefix_matches("x").is_empty());
    assert_eq!(index.get_prefix_matches("").len(), WORDS.len());
}

#[test]
fn test_large_depth_is_exact() {
    let index = PrefixIndex::with_max_depth(64).unwrap().with_batch(WORDS);
    assert_eq!(
        sorted(index.get_prefix_matches("tea")),
        vec!["tea", "teacup", "team", "tease"]
    );
    assert_eq!(index.get_prefix_matches("teac"), vec!["teacup"]);
    assert!(index.get_prefix_matches("teab").is_empty());
}

#[test]
fn test_every_prefix_reaches_its_word() {
    for depth in 0..6 {
        let index = PrefixIndex::from_phrases(WORDS, depth);
        for word in WORDS {
            for k in 0..=word.len() {
                let matches = index.get_prefix_matches(&word[..k]);
                assert!(
                    matches.iter().any(|m| m == word),
                    "depth {}: prefix {:?} lost {:?}",
                    depth,
                    &word[..k],
                    word
                );
            }
        }
    }
}

#[test]
fn test_short_word_next_to_longer_siblings() {
    let index = PrefixIndex::from_phrases(["te", "tea", "tease"], 3);
    assert_eq!(index.get_prefix_matches("te"), vec!["te", "tea", "tease"]);
    assert!(index.contains("te"));
    assert!(!index.contains("t"));
}

#[test]
fn test_inputs_are_normalized() {
    let mut index = PrefixIndex::new();
    assert!(index.insert("  Crème   Brûlée "));
    assert!(!index.insert("creme brulee"));
    assert!(!index.insert("   "));
    assert_eq!(index.get_prefix_matches("CRÈ"), vec!["creme brulee"]);
}

#[test]
fn test_functional_insert_leaves_source_untouched() {
    let base = PrefixIndex::from_phrases(["tea", "toast"], 2);
    let before = base.phrases();

    let next = base.with_inserted("teacup");
    assert_eq!(base.len(), 2);
    assert_eq!(base.phrases(), before);
    assert!(!base.contains("teacup"));
    assert!(next.contains("teacup"));
    assert_eq!(next.len(), 3);
    assert!(next.shared_nodes(&base) > 0);
}

#[test]
fn test_batch_counts_new_phrases() {
    let mut index = PrefixIndex::new();
    assert_eq!(index.insert_batch(["a", "b", "a", ""]), 2);

    let copy = index.with_batch(["c", "b"]);
    assert_eq!(index.len(), 2);
    assert_eq!(copy.len(), 3);
}
