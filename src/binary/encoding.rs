// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Payload encoding: raw little-endian elements in row-major order.
//!
//! No compression, no padding between elements, no per-element framing. The
//! payload is exactly `element_count * element_width` bytes, which is what
//! makes a length check a sufficient corruption check.

use crate::error::{Result, TagError};
use crate::kind::ElementKind;
use crate::scalar::Element;
use crate::value::{with_numeric, Buffer, TextCells};

use super::header::Header;

/// Append the payload bytes of `buffer` to `out`.
pub fn encode_payload(buffer: &Buffer, out: &mut Vec<u8>) {
    out.reserve(buffer.len() * buffer.element_width());
    with_numeric!(
        buffer,
        data => {
            for &x in data {
                x.put_le(out);
            }
        },
        cells => out.extend_from_slice(cells.as_bytes())
    );
}

/// Decode a payload whose length has already been checked against `header`.
pub fn decode_payload(header: &Header, bytes: &[u8]) -> Result<Buffer> {
    let count = header
        .element_count()
        .ok_or_else(|| TagError::corrupt("shape product overflows"))?;

    match header.kind {
        ElementKind::Int8 => decode_elements::<i8>(bytes),
        ElementKind::Int16 => decode_elements::<i16>(bytes),
        ElementKind::Int32 => decode_elements::<i32>(bytes),
        ElementKind::Int64 => decode_elements::<i64>(bytes),
        ElementKind::UInt8 => decode_elements::<u8>(bytes),
        ElementKind::UInt16 => decode_elements::<u16>(bytes),
        ElementKind::UInt32 => decode_elements::<u32>(bytes),
        ElementKind::UInt64 => decode_elements::<u64>(bytes),
        ElementKind::Float32 => decode_elements::<f32>(bytes),
        ElementKind::Float64 => decode_elements::<f64>(bytes),
        ElementKind::Bool => decode_elements::<bool>(bytes),
        ElementKind::Text => {
            let width = header.cell_width.unwrap_or(0);
            TextCells::from_raw(width, count, bytes.to_vec())
                .map(Buffer::Text)
                .ok_or_else(|| TagError::corrupt("text cell is not valid UTF-8"))
        }
    }
}

fn decode_elements<T: Element>(bytes: &[u8]) -> Result<Buffer> {
    let data = bytes
        .chunks_exact(T::WIDTH)
        .enumerate()
        .map(|(i, chunk)| {
            T::get_le(chunk).ok_or_else(|| {
                TagError::corrupt(format!("invalid {} encoding at element {}", T::KIND, i))
            })
        })
        .collect::<Result<Vec<T>>>()?;
    Ok(T::into_buffer(data))
}
