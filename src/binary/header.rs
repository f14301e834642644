// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Header of a persisted tagged value.
//!
//! The header is read in one pass before the payload and says exactly how
//! many payload bytes must follow. All integers are little-endian.
//!
//! ```text
//! ┌──────────┬──────────┬───────────────────────┬──────────────────┐
//! │ kind id  │ ndim     │ extents               │ cell width       │
//! │ 1 byte   │ 1 byte   │ ndim x u64            │ u64, text only   │
//! └──────────┴──────────┴───────────────────────┴──────────────────┘
//! ```
//!
//! A header is only as trustworthy as the bytes after it. Nothing here
//! allocates from header-declared sizes: payload length is computed with
//! checked arithmetic and compared against what is actually present.

use std::io::{self, Write};

use serde::Serialize;

use crate::error::{Result, TagError};
use crate::kind::{Dimensionality, ElementKind};
use crate::tag::Tag;
use crate::value::RuntimeValue;

/// Size of the fixed prefix (kind id + ndim).
pub const PREFIX_SIZE: usize = 2;

/// Size of each axis extent and of the text cell width.
pub const EXTENT_SIZE: usize = 8;

/// Decoded header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub kind: ElementKind,
    pub dims: Dimensionality,
    pub shape: Vec<usize>,
    /// Bytes per text cell. `Some` iff `kind` is text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_width: Option<usize>,
}

impl Header {
    /// Describe a value that is already known to be flat or grid.
    pub(crate) fn describe(value: &RuntimeValue) -> Option<Self> {
        let kind = value.actual_kind();
        Some(Self {
            kind,
            dims: Dimensionality::from_arity(value.actual_ndim())?,
            shape: value.shape().to_vec(),
            cell_width: value.text().map(|cells| cells.width()),
        })
    }

    pub fn tag(&self) -> Tag {
        Tag::new(self.kind, self.dims)
    }

    /// Encoded size of this header in bytes.
    pub fn encoded_len(&self) -> usize {
        let width_field = if self.cell_width.is_some() { EXTENT_SIZE } else { 0 };
        PREFIX_SIZE + EXTENT_SIZE * self.shape.len() + width_field
    }

    /// Bytes per element on disk.
    pub fn element_width(&self) -> usize {
        self.cell_width.or(self.kind.width()).unwrap_or(0)
    }

    /// Product of the extents, or `None` on overflow.
    pub fn element_count(&self) -> Option<usize> {
        self.shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Exact payload size the header promises, or `None` on overflow.
    pub fn payload_len(&self) -> Option<usize> {
        self.element_count()?.checked_mul(self.element_width())
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&[self.kind.id(), self.dims.id()])?;
        for &extent in &self.shape {
            w.write_all(&(extent as u64).to_le_bytes())?;
        }
        if let Some(width) = self.cell_width {
            w.write_all(&(width as u64).to_le_bytes())?;
        }
        Ok(())
    }

    /// Parse a header from the front of `bytes`.
    ///
    /// Returns the header and the number of bytes it occupied.
    pub fn parse(bytes: &[u8]) -> Result<(Self, usize)> {
        let &[kind_id, dims_id, ..] = bytes else {
            return Err(TagError::corrupt(format!(
                "file too short for header: {} bytes",
                bytes.len()
            )));
        };

        let kind = ElementKind::from_id(kind_id)
            .ok_or_else(|| TagError::corrupt(format!("unknown element kind id {kind_id}")))?;
        let dims = Dimensionality::from_id(dims_id)
            .ok_or_else(|| TagError::corrupt(format!("unsupported dimensionality {dims_id}")))?;

        let mut pos = PREFIX_SIZE;
        let mut shape = Vec::with_capacity(dims.arity());
        for axis in 0..dims.arity() {
            shape.push(read_u64_field(bytes, &mut pos, || format!("extent of axis {axis}"))?);
        }
        let cell_width = if kind == ElementKind::Text {
            Some(read_u64_field(bytes, &mut pos, || "text cell width".to_string())?)
        } else {
            None
        };

        Ok((
            Self {
                kind,
                dims,
                shape,
                cell_width,
            },
            pos,
        ))
    }
}

fn read_u64_field(bytes: &[u8], pos: &mut usize, what: impl Fn() -> String) -> Result<usize> {
    let field = bytes
        .get(*pos..*pos + EXTENT_SIZE)
        .ok_or_else(|| TagError::corrupt(format!("header truncated in {}", what())))?;
    let raw = u64::from_le_bytes(
        field
            .try_into()
            .map_err(|_| TagError::corrupt(format!("header truncated in {}", what())))?,
    );
    *pos += EXTENT_SIZE;
    usize::try_from(raw)
        .map_err(|_| TagError::corrupt(format!("{} = {} does not fit in memory", what(), raw)))
}
