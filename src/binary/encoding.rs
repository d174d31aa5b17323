// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint and length-prefixed strings.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See: DWARF4 specification §7.6 "Variable Length Data", and
//!   Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>

use std::io;

use super::header::{MAX_STRING_LEN, MAX_VARINT_BYTES};

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Fails on an empty buffer, a buffer that ends mid-varint, or a varint longer
/// than [`MAX_VARINT_BYTES`].
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        result |= u64::from(byte & 0x7F) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

// ============================================================================
// STRINGS
// ============================================================================

/// Encode a UTF-8 string as varint length + bytes
pub fn encode_string(value: &str, buf: &mut Vec<u8>) {
    let bytes = value.as_bytes();
    encode_varint(bytes.len() as u64, buf);
    buf.extend_from_slice(bytes);
}

/// Decode a length-prefixed string, returning (string, bytes_consumed)
pub fn decode_string(bytes: &[u8]) -> io::Result<(String, usize)> {
    let (len, mut pos) = decode_varint(bytes)?;
    let len = len as usize;

    if len > MAX_STRING_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("String length {} exceeds limit {}", len, MAX_STRING_LEN),
        ));
    }

    let end = pos.checked_add(len).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "String length causes overflow")
    })?;
    if end > bytes.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Truncated string (expected {} bytes)", len),
        ));
    }

    let value = std::str::from_utf8(&bytes[pos..end])
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e)))?
        .to_string();
    pos = end;

    Ok((value, pos))
}
