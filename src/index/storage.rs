// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Named index storage.
//!
//! Indexes are stored by name in one of two backends picked by configuration:
//! a process-local RAM map (tests, throwaway sessions) or a directory of
//! `<name>.taxon` files. Both hold the same encoded bytes, see [`crate::binary`].

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::{PhraseIndex, TrieIndex};
use crate::binary::IndexFile;
use crate::error::{Error, Result};

/// File extension for persisted indexes.
pub const INDEX_EXTENSION: &str = "taxon";

/// Which backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Ram,
    #[default]
    File,
}

/// Creates, opens and saves indexes by name.
#[derive(Debug)]
pub enum IndexStorage {
    Ram(Mutex<HashMap<String, Vec<u8>>>),
    File(PathBuf),
}

impl IndexStorage {
    pub fn ram() -> Self {
        Self::Ram(Mutex::new(HashMap::new()))
    }

    /// File storage rooted at `dir`, created if missing.
    pub fn file(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self::File(dir))
    }

    pub fn with_kind(kind: StorageKind, dir: &Path) -> Result<Self> {
        match kind {
            StorageKind::Ram => Ok(Self::ram()),
            StorageKind::File => Self::file(dir),
        }
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            Self::Ram(_) => StorageKind::Ram,
            Self::File(_) => StorageKind::File,
        }
    }

    /// Path an index of this name lives at (file backend only).
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        match self {
            Self::Ram(_) => None,
            Self::File(dir) => Some(dir.join(format!("{name}.{INDEX_EXTENSION}"))),
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        if validate_name(name).is_err() {
            return false;
        }
        match self {
            Self::Ram(map) => map.lock().contains_key(name),
            Self::File(dir) => dir.join(format!("{name}.{INDEX_EXTENSION}")).is_file(),
        }
    }

    /// Create an empty index, replacing any existing one of the same name.
    pub fn create(&self, name: &str, max_depth: usize) -> Result<TrieIndex> {
        let index = TrieIndex::new(max_depth);
        self.save(name, &index)?;
        tracing::info!(name, max_depth, "created index");
        Ok(index)
    }

    /// Open an existing index. Fails with [`Error::IndexNotFound`] when absent.
    pub fn open(&self, name: &str) -> Result<TrieIndex> {
        validate_name(name)?;
        let bytes = self.read(name)?.ok_or_else(|| Error::IndexNotFound(name.to_string()))?;
        let file = IndexFile::from_bytes(&bytes)?;
        let index = TrieIndex::from_entries(file.entries, file.max_depth);
        tracing::debug!(name, records = index.len(), "opened index");
        Ok(index)
    }

    pub fn open_or_create(&self, name: &str, max_depth: usize) -> Result<TrieIndex> {
        if self.exists(name) {
            self.open(name)
        } else {
            self.create(name, max_depth)
        }
    }

    /// Persist an index under `name`.
    pub fn save(&self, name: &str, index: &TrieIndex) -> Result<()> {
        validate_name(name)?;
        let bytes = IndexFile::new(index.max_depth(), index.entries()).to_bytes()?;

        match self {
            Self::Ram(map) => {
                map.lock().insert(name.to_string(), bytes);
            }
            Self::File(dir) => {
                let path = dir.join(format!("{name}.{INDEX_EXTENSION}"));
                let tmp = dir.join(format!(".{name}.{INDEX_EXTENSION}.tmp"));
                let mut file = fs::File::create(&tmp)?;
                file.write_all(&bytes)?;
                file.sync_all()?;
                fs::rename(&tmp, &path)?;
            }
        }
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match self {
            Self::Ram(map) => Ok(map.lock().get(name).cloned()),
            Self::File(dir) => {
                let path = dir.join(format!("{name}.{INDEX_EXTENSION}"));
                match fs::read(&path) {
                    Ok(bytes) => Ok(Some(bytes)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }
}

/// Index names become file names, so keep them to one plain path component.
fn validate_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("invalid index name `{name}`")))
    }
}
