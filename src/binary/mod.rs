// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for persisted vocabulary indexes.
//!
//! Only the ingested entries are stored. The prefix tries and postings are
//! derived data and get rebuilt on load, which keeps the file small and lets
//! the trie layout change without a format bump.
//!
//! # Security Considerations
//!
//! Files are parsed as untrusted input:
//! - Size fields are validated against `MAX_*` constants
//! - Bounds checking prevents buffer overreads
//! - CRC32 footer detects corruption and truncation
//! - Varint decoder has a maximum iteration limit
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (16 bytes)                                          │
//! │   magic: [u8; 4] = "TXON"                                  │
//! │   version: u8 = 1                                          │
//! │   reserved: [u8; 3]                                        │
//! │   max_depth: u32                                           │
//! │   record_count: u32                                        │
//! ├────────────────────────────────────────────────────────────┤
//! │ RECORDS (record_count times)                               │
//! │   line: varint                                             │
//! │   original: varint len + UTF-8                             │
//! │   stemmed: varint len + UTF-8                              │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "NOXT"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod encoding;
mod header;

pub use encoding::{decode_string, decode_varint, encode_string, encode_varint};
pub use header::{
    IndexFooter, IndexHeader, FOOTER_MAGIC, MAGIC, MAX_FILE_SIZE, MAX_RECORD_COUNT,
    MAX_STORED_DEPTH, MAX_STRING_LEN, MAX_VARINT_BYTES, VERSION,
};

use std::io;

use crate::error::{Error, Result};
use crate::index::IndexEntry;

/// Decoded contents of an index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFile {
    pub max_depth: usize,
    pub entries: Vec<IndexEntry>,
}

impl IndexFile {
    pub fn new(max_depth: usize, entries: Vec<IndexEntry>) -> Self {
        Self { max_depth, entries }
    }

    /// Serialize with header and CRC32 footer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let max_depth = u32::try_from(self.max_depth)
            .ok()
            .filter(|&d| d <= MAX_STORED_DEPTH)
            .ok_or_else(|| {
                Error::CorruptIndex(format!("max depth {} cannot be stored", self.max_depth))
            })?;
        let record_count = u32::try_from(self.entries.len())
            .ok()
            .filter(|&n| n <= MAX_RECORD_COUNT)
            .ok_or_else(|| {
                Error::CorruptIndex(format!("{} records exceed the file limit", self.entries.len()))
            })?;

        let mut buf = Vec::with_capacity(IndexHeader::SIZE + self.entries.len() * 32);
        IndexHeader::new(max_depth, record_count).write(&mut buf)?;

        for entry in &self.entries {
            let len = entry.original.len().max(entry.stemmed.len());
            if len > MAX_STRING_LEN {
                return Err(Error::RecordTooLarge {
                    line: entry.line,
                    len,
                    limit: MAX_STRING_LEN,
                });
            }
            encode_varint(entry.line, &mut buf);
            encode_string(&entry.original, &mut buf);
            encode_string(&entry.stemmed, &mut buf);
        }

        let crc32 = IndexFooter::compute_crc32(&buf);
        IndexFooter { crc32 }.write(&mut buf)?;

        Ok(buf)
    }

    /// Deserialize with full validation.
    ///
    /// Any structural problem (size, magic, version, checksum, record layout,
    /// trailing bytes) is reported as [`Error::CorruptIndex`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes).map_err(|e| Error::CorruptIndex(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() > MAX_FILE_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("File too large: {} bytes (max {})", bytes.len(), MAX_FILE_SIZE),
            ));
        }

        let min_size = IndexHeader::SIZE + IndexFooter::SIZE;
        if bytes.len() < min_size {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("File too small: {} bytes (minimum {})", bytes.len(), min_size),
            ));
        }

        let footer = IndexFooter::read(bytes)?;
        let content = &bytes[..bytes.len() - IndexFooter::SIZE];
        let computed_crc32 = IndexFooter::compute_crc32(content);
        if footer.crc32 != computed_crc32 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "CRC32 mismatch: expected {:#010x}, got {:#010x} (file corrupted)",
                    footer.crc32, computed_crc32
                ),
            ));
        }

        let header = IndexHeader::read(&mut io::Cursor::new(content))?;
        header.validate()?;

        let records = &content[IndexHeader::SIZE..];
        let count = header.record_count as usize;

        // Each record needs at least three bytes (line + two empty lengths).
        if count > records.len() / 3 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Record count {} exceeds available bytes {}",
                    count,
                    records.len()
                ),
            ));
        }

        let mut entries = Vec::with_capacity(count);
        let mut pos = 0;
        for i in 0..count {
            let (line, consumed) = decode_varint(&records[pos..]).map_err(|e| annotate(e, i))?;
            pos += consumed;
            let (original, consumed) = decode_string(&records[pos..]).map_err(|e| annotate(e, i))?;
            pos += consumed;
            let (stemmed, consumed) = decode_string(&records[pos..]).map_err(|e| annotate(e, i))?;
            pos += consumed;

            entries.push(IndexEntry {
                original,
                stemmed,
                line,
            });
        }

        if pos != records.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} trailing bytes after records", records.len() - pos),
            ));
        }

        Ok(Self {
            max_depth: header.max_depth as usize,
            entries,
        })
    }
}

fn annotate(err: io::Error, record: usize) -> io::Error {
    io::Error::new(err.kind(), format!("record {}: {}", record, err))
}
