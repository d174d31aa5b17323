//! RAM and file storage backends.

use std::fs;

use taxon::binary::{IndexFile, MAX_STRING_LEN};
use taxon::{Error, IndexEntry, IndexStorage, MatcherConfig, PhraseIndex, PhraseMatcher, StorageKind, TrieIndex};
use tempfile::TempDir;

use crate::common::{make_entries, SAMPLE_VOCABULARY};

const QUERIES: &[&str] = &[
    "pancake",
    "I like lemon juice and granulated sugar on my pancakes",
    "strawbery jam on toast",
    "crème brûlée",
    "iced tea",
];

fn populated(depth: usize) -> TrieIndex {
    TrieIndex::from_entries(make_entries(SAMPLE_VOCABULARY), depth)
}

fn results(index: TrieIndex) -> Vec<Vec<String>> {
    let matcher = PhraseMatcher::new(index, &MatcherConfig::default()).unwrap();
    QUERIES.iter().map(|q| matcher.run_query(q)).collect()
}

#[test]
fn test_file_roundtrip_preserves_results() {
    let dir = TempDir::new().unwrap();
    let storage = IndexStorage::file(dir.path()).unwrap();
    assert_eq!(storage.kind(), StorageKind::File);

    let index = populated(3);
    storage.save("foods", &index).unwrap();
    let reopened = storage.open("foods").unwrap();

    assert_eq!(reopened.len(), index.len());
    assert_eq!(reopened.max_depth(), 3);
    assert_eq!(reopened.entries(), index.entries());
    assert_eq!(results(reopened), results(index));
}

#[test]
fn test_ram_roundtrip_preserves_results() {
    let storage = IndexStorage::ram();
    let index = populated(2);
    storage.save("foods", &index).unwrap();
    assert!(storage.path_for("foods").is_none());
    assert_eq!(results(storage.open("foods").unwrap()), results(index));
}

#[test]
fn test_corrupted_file_rejected() {
    let dir = TempDir::new().unwrap();
    let storage = IndexStorage::file(dir.path()).unwrap();
    storage.save("foods", &populated(3)).unwrap();

    let path = storage.path_for("foods").unwrap();
    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0x5a;
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(storage.open("foods"), Err(Error::CorruptIndex(_))));
}

#[test]
fn test_truncated_file_rejected() {
    let dir = TempDir::new().unwrap();
    let storage = IndexStorage::file(dir.path()).unwrap();
    storage.save("foods", &populated(3)).unwrap();

    let path = storage.path_for("foods").unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    assert!(matches!(storage.open("foods"), Err(Error::CorruptIndex(_))));
}

#[test]
fn test_missing_index() {
    let dir = TempDir::new().unwrap();
    let storage = IndexStorage::file(dir.path()).unwrap();
    assert!(!storage.exists("nothing"));
    assert!(matches!(storage.open("nothing"), Err(Error::IndexNotFound(_))));
}

#[test]
fn test_create_replaces_existing() {
    let dir = TempDir::new().unwrap();
    let storage = IndexStorage::file(dir.path()).unwrap();
    storage.save("foods", &populated(3)).unwrap();

    let fresh = storage.create("foods", 5).unwrap();
    assert!(fresh.is_empty());
    let reopened = storage.open("foods").unwrap();
    assert!(reopened.is_empty());
    assert_eq!(reopened.max_depth(), 5);
}

#[test]
fn test_open_or_create_keeps_existing() {
    let storage = IndexStorage::ram();
    storage.save("foods", &populated(3)).unwrap();
    let opened = storage.open_or_create("foods", 9).unwrap();
    assert_eq!(opened.len(), SAMPLE_VOCABULARY.len());
    assert_eq!(opened.max_depth(), 3);
}

#[test]
fn test_names_must_be_plain() {
    let storage = IndexStorage::ram();
    for name in ["", "../escape", ".hidden", "a/b", "with space"] {
        assert!(
            matches!(storage.save(name, &TrieIndex::default()), Err(Error::InvalidConfig(_))),
            "{:?}",
            name
        );
        assert!(!storage.exists(name));
    }
}

#[test]
fn test_file_written_is_decodable() {
    let dir = TempDir::new().unwrap();
    let storage = IndexStorage::file(dir.path().join("nested").join("dir")).unwrap();
    storage.save("foods", &populated(3)).unwrap();

    let bytes = fs::read(storage.path_for("foods").unwrap()).unwrap();
    let file = IndexFile::from_bytes(&bytes).unwrap();
    assert_eq!(file.entries.len(), SAMPLE_VOCABULARY.len());
    assert!(!dir.path().join("nested/dir/.foods.taxon.tmp").exists());
}

#[test]
fn test_oversized_phrase_fails_save_and_keeps_previous_file() {
    let dir = TempDir::new().unwrap();
    let storage = IndexStorage::file(dir.path()).unwrap();
    storage.save("foods", &populated(3)).unwrap();

    let long = "b".repeat(70 * 1024);
    let oversized = TrieIndex::from_entries([IndexEntry::new(long.clone(), long, 1)], 3);
    assert_eq!(oversized.len(), 1);

    let err = storage.save("foods", &oversized).unwrap_err();
    assert!(matches!(err, Error::RecordTooLarge { line: 1, limit: MAX_STRING_LEN, .. }));

    let reopened = storage.open("foods").unwrap();
    assert_eq!(reopened.len(), SAMPLE_VOCABULARY.len());
}
