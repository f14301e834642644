// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for persisted tagged values.
//!
//! One value per file: a short header saying what the payload is, then the
//! payload. Writing asserts the value against its tag first, so a file on
//! disk always describes itself truthfully at the moment it was written.
//! Reading re-asserts against the tag the *reader* declares. There is no
//! coercion on load: a file written as `int64` and read as `int32` is a
//! `KindMismatch`, not a silent narrowing.
//!
//! # Format
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER                                                     │
//! │   kind id: u8          (1..=12, see `kind`)                │
//! │   ndim: u8             (1 = flat, 2 = grid)                │
//! │   extents: [u64; ndim]                                     │
//! │   cell width: u64      (text only)                         │
//! ├────────────────────────────────────────────────────────────┤
//! │ PAYLOAD                                                    │
//! │   product(extents) x element width bytes                   │
//! │   little-endian, row-major for grids                       │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Failure order on read
//!
//! 1. Header malformed or truncated → `CorruptHeader`
//! 2. Payload length ≠ promised length → `CorruptHeader`
//! 3. Payload bytes invalid (bool not 0/1, text not UTF-8) → `CorruptHeader`
//! 4. Header kind ≠ tag kind → `KindMismatch`
//! 5. Header ndim ≠ tag arity → `DimensionMismatch`
//!
//! Writes are not atomic. A crash mid-write leaves a truncated file, which
//! the next read reports as `CorruptHeader`. Concurrent writers to one path
//! must be serialized by the caller.

mod encoding;
mod header;

pub use encoding::{decode_payload, encode_payload};
pub use header::{Header, EXTENT_SIZE, PREFIX_SIZE};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::contracts;
use crate::engine;
use crate::error::{Result, TagError};
use crate::kind::Dimensionality;
use crate::tag::Tag;
use crate::value::RuntimeValue;

// ============================================================================
// ENCODE
// ============================================================================

/// Assert `value` against `tag` and encode it to bytes.
pub fn to_bytes(tag: Tag, value: &RuntimeValue) -> Result<Vec<u8>> {
    engine::verify(tag, value)?;
    let header = Header::describe(value).ok_or(TagError::DimensionMismatch {
        expected: tag,
        actual_kind: value.actual_kind(),
        actual_ndim: value.actual_ndim(),
    })?;

    let mut out = Vec::with_capacity(header.encoded_len() + header.payload_len().unwrap_or(0));
    header.write(&mut out)?;
    let header_len = out.len();
    encode_payload(value.buffer(), &mut out);
    contracts::check_payload_len(value, out.len() - header_len);
    Ok(out)
}

/// Assert `value` against `tag` and write it to `w`.
pub fn write<W: Write>(tag: Tag, value: &RuntimeValue, w: &mut W) -> Result<()> {
    let bytes = to_bytes(tag, value)?;
    w.write_all(&bytes)?;
    tracing::debug!(
        tag = %tag,
        shape = ?value.shape(),
        bytes = bytes.len(),
        "wrote tagged value"
    );
    Ok(())
}

/// Assert `value` against `tag` and write it to a file at `path`, replacing it.
pub fn write_path(tag: Tag, value: &RuntimeValue, path: impl AsRef<Path>) -> Result<()> {
    // Check before touching the filesystem so a bad value never truncates a good file.
    engine::verify(tag, value)?;
    let mut w = BufWriter::new(File::create(path.as_ref())?);
    write(tag, value, &mut w)?;
    w.flush()?;
    Ok(())
}

// ============================================================================
// DECODE
// ============================================================================

/// Decode a value without checking it against any tag.
///
/// Header and payload are still fully validated.
pub fn from_bytes_any(bytes: &[u8]) -> Result<RuntimeValue> {
    let (header, header_len) = Header::parse(bytes)?;
    let payload = &bytes[header_len..];

    let expected = header.payload_len().ok_or_else(|| {
        TagError::corrupt(format!("shape {:?} overflows the payload size", header.shape))
    })?;
    if payload.len() != expected {
        return Err(TagError::corrupt(format!(
            "payload is {} bytes but shape {:?} of {} needs {}",
            payload.len(),
            header.shape,
            header.kind,
            expected
        )));
    }

    let buffer = decode_payload(&header, payload)?;
    let value = RuntimeValue::new(buffer, header.shape.clone())
        .map_err(|e| TagError::corrupt(e.to_string()))?;

    tracing::debug!(
        kind = %header.kind,
        shape = ?header.shape,
        bytes = bytes.len(),
        "decoded tagged value"
    );
    Ok(value)
}

/// Decode a value and assert it against `tag`.
pub fn from_bytes(tag: Tag, bytes: &[u8]) -> Result<RuntimeValue> {
    engine::assert(tag, from_bytes_any(bytes)?)
}

/// Read a value from `r` without checking it against any tag.
pub fn read_any<R: Read>(r: &mut R) -> Result<RuntimeValue> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes)?;
    from_bytes_any(&bytes)
}

/// Read a value from `r` and assert it against `tag`.
pub fn read<R: Read>(tag: Tag, r: &mut R) -> Result<RuntimeValue> {
    engine::assert(tag, read_any(r)?)
}

/// Read a value of any kind, checking only that it has `dims` axes.
pub fn read_with_dims<R: Read>(dims: Dimensionality, r: &mut R) -> Result<RuntimeValue> {
    let value = read_any(r)?;
    // Borrow the value's own kind so only dimensionality can mismatch.
    engine::assert(Tag::new(value.actual_kind(), dims), value)
}

/// Read a value of any kind and shape from a file.
pub fn read_any_path(path: impl AsRef<Path>) -> Result<RuntimeValue> {
    read_any(&mut BufReader::new(File::open(path.as_ref())?))
}

/// Read a value from a file and assert it against `tag`.
pub fn read_path(tag: Tag, path: impl AsRef<Path>) -> Result<RuntimeValue> {
    engine::assert(tag, read_any_path(path)?)
}

/// Read only the header of a file, e.g. to find out what it holds.
pub fn read_header_path(path: impl AsRef<Path>) -> Result<Header> {
    // Two extents plus a text cell width is the longest possible header.
    let longest = (PREFIX_SIZE + 3 * EXTENT_SIZE) as u64;
    let mut bytes = Vec::new();
    File::open(path.as_ref())?.take(longest).read_to_end(&mut bytes)?;
    Header::parse(&bytes).map(|(header, _)| header)
}

/// Whether a file exists at `path` to read a value from.
pub fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}
