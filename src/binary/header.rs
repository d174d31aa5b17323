// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index file header and footer.
//!
//! The header is 16 bytes of fixed-size fields read before anything else. It
//! carries the trie depth the index was built with and the record count, so the
//! decoder can size its allocations and reject absurd files up front.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("NOXT", the header magic reversed). A bad footer means the file
//! was truncated or corrupted and nothing in it is trusted.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "TXON" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x54, 0x58, 0x4F, 0x4E];

/// Footer magic: "NOXT" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = [0x4E, 0x4F, 0x58, 0x54];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 256 MB
pub const MAX_FILE_SIZE: usize = 256 * 1024 * 1024;

/// Maximum number of records
pub const MAX_RECORD_COUNT: u32 = 20_000_000;

/// Maximum byte length of a single stored string
pub const MAX_STRING_LEN: usize = 64 * 1024;

/// Maximum trie depth accepted from a file
pub const MAX_STORED_DEPTH: u32 = 1024;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// HEADER
// ============================================================================

/// Index file header (16 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub version: u8,
    pub max_depth: u32,
    pub record_count: u32,
}

impl IndexHeader {
    // 4 (magic) + 1 (version) + 3 (reserved) + 4 (max_depth) + 4 (record_count) = 16
    pub const SIZE: usize = 16;

    pub fn new(max_depth: u32, record_count: u32) -> Self {
        Self {
            version: VERSION,
            max_depth,
            record_count,
        }
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[0u8; 3])?; // reserved
        w.write_all(&self.max_depth.to_le_bytes())?;
        w.write_all(&self.record_count.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected TXON, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 12]; // 16 - 4 (magic)
        r.read_exact(&mut buf)?;

        Ok(Self {
            version: buf[0],
            // buf[1..4] is reserved
            max_depth: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            record_count: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        })
    }

    /// Reject headers this build cannot or should not load.
    pub fn validate(&self) -> io::Result<()> {
        if self.version != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Unsupported version: {} (expected {})",
                    self.version, VERSION
                ),
            ));
        }
        if self.max_depth > MAX_STORED_DEPTH {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Max depth {} exceeds limit {}",
                    self.max_depth, MAX_STORED_DEPTH
                ),
            ));
        }
        if self.record_count > MAX_RECORD_COUNT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Record count {} exceeds limit {}",
                    self.record_count, MAX_RECORD_COUNT
                ),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFooter {
    /// CRC32 of header + records (everything before the footer)
    pub crc32: u32,
}

impl IndexFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected NOXT, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
