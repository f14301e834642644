// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Untyped runtime containers.
//!
//! A [`RuntimeValue`] is what the numeric side of a program hands around: a
//! contiguous row-major [`Buffer`] plus a shape. It knows its own element kind
//! and axis count, but nothing stops it from being 0-, 3- or 7-dimensional.
//! Tags are checked against it, never stored in it.

use crate::error::ShapeError;
use crate::kind::ElementKind;
use crate::scalar::{self, Element, Scalar};

// ============================================================================
// TEXT CELLS
// ============================================================================

/// Fixed-width UTF-8 text storage.
///
/// Every cell occupies exactly `width` bytes, NUL-padded on the right. A cell
/// reads back as its bytes with trailing NULs stripped, so strings that end in
/// `'\0'` do not survive storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextCells {
    width: usize,
    len: usize,
    bytes: Vec<u8>,
}

impl TextCells {
    /// Pack strings into cells as wide as the longest one.
    pub fn from_strs<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let strings: Vec<S> = strings.into_iter().collect();
        let width = strings.iter().map(|s| s.as_ref().len()).max().unwrap_or(0);
        let mut bytes = Vec::with_capacity(width * strings.len());
        for s in &strings {
            let s = s.as_ref().as_bytes();
            bytes.extend_from_slice(s);
            bytes.resize(bytes.len() + (width - s.len()), 0);
        }
        Self {
            width,
            len: strings.len(),
            bytes,
        }
    }

    /// No cells at all.
    pub const fn new() -> Self {
        Self {
            width: 0,
            len: 0,
            bytes: Vec::new(),
        }
    }

    /// `len` empty cells of the given width.
    pub fn empty(width: usize, len: usize) -> Self {
        Self {
            width,
            len,
            bytes: vec![0; width * len],
        }
    }

    /// Wrap raw cell bytes, validating that every cell is UTF-8 once its
    /// NUL padding is removed.
    pub fn from_raw(width: usize, len: usize, bytes: Vec<u8>) -> Option<Self> {
        if width.checked_mul(len)? != bytes.len() {
            return None;
        }
        let cells = Self { width, len, bytes };
        // Zero-width cells are all empty; `len` may be huge with no bytes behind it.
        if width == 0 || (0..len).all(|i| std::str::from_utf8(cells.raw_cell(i)).is_ok()) {
            Some(cells)
        } else {
            None
        }
    }

    /// Bytes per cell.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All cell bytes, padding included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn raw_cell(&self, index: usize) -> &[u8] {
        let cell = &self.bytes[index * self.width..(index + 1) * self.width];
        let end = cell.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
        &cell[..end]
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        if index >= self.len {
            return None;
        }
        std::str::from_utf8(self.raw_cell(index)).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }
}

// ============================================================================
// BUFFER
// ============================================================================

/// Contiguous element storage, one variant per [`ElementKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Bool(Vec<bool>),
    Text(TextCells),
}

/// Apply `$body` to the inner vector of every numeric variant; `$text` handles text.
macro_rules! with_numeric {
    ($buffer:expr, $data:ident => $body:expr, $cells:ident => $text:expr) => {
        match $buffer {
            Buffer::Int8($data) => $body,
            Buffer::Int16($data) => $body,
            Buffer::Int32($data) => $body,
            Buffer::Int64($data) => $body,
            Buffer::UInt8($data) => $body,
            Buffer::UInt16($data) => $body,
            Buffer::UInt32($data) => $body,
            Buffer::UInt64($data) => $body,
            Buffer::Float32($data) => $body,
            Buffer::Float64($data) => $body,
            Buffer::Bool($data) => $body,
            Buffer::Text($cells) => $text,
        }
    };
}

pub(crate) use with_numeric;

impl Buffer {
    pub fn kind(&self) -> ElementKind {
        with_numeric!(self, data => element_kind_of(data.as_slice()), _cells => ElementKind::Text)
    }

    pub fn len(&self) -> usize {
        with_numeric!(self, data => data.len(), cells => cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per element as stored on disk.
    pub fn element_width(&self) -> usize {
        match self {
            Buffer::Text(cells) => cells.width(),
            other => other.kind().width().unwrap_or(0),
        }
    }

    /// Allocate a converted copy of this buffer in `target` kind.
    ///
    /// `None` when either side is text and the other is not. Text to text
    /// returns a clone.
    pub fn convert_to(&self, target: ElementKind) -> Option<Buffer> {
        with_numeric!(
            self,
            data => scalar::convert_into(data.as_slice(), target),
            cells => (target == ElementKind::Text).then(|| Buffer::Text(cells.clone()))
        )
    }

    /// Element at flat (row-major) position `index`, or `None` for text or out of range.
    pub fn scalar_at(&self, index: usize) -> Option<Scalar> {
        with_numeric!(
            self,
            data => data.get(index).map(|&x| x.to_scalar()),
            _cells => None
        )
    }
}

fn element_kind_of<T: Element>(_: &[T]) -> ElementKind {
    T::KIND
}

// ============================================================================
// RUNTIME VALUE
// ============================================================================

/// An untyped numeric container: a buffer and the extents of its axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeValue {
    buffer: Buffer,
    shape: Vec<usize>,
}

impl RuntimeValue {
    /// Pair a buffer with a shape of any rank.
    ///
    /// Fails if the product of `shape` differs from the buffer length.
    pub fn new(buffer: Buffer, shape: Vec<usize>) -> Result<Self, ShapeError> {
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| ShapeError {
                shape: shape.clone(),
                expected: None,
                actual: buffer.len(),
            })?;
        if expected != buffer.len() {
            return Err(ShapeError {
                shape,
                expected: Some(expected),
                actual: buffer.len(),
            });
        }
        Ok(Self { buffer, shape })
    }

    /// A flat sequence owning `data`.
    pub fn from_vec<T: Element>(data: Vec<T>) -> Self {
        let shape = vec![data.len()];
        Self {
            buffer: T::into_buffer(data),
            shape,
        }
    }

    /// A value of arbitrary shape owning `data` in row-major order.
    pub fn from_shape_vec<T: Element>(shape: Vec<usize>, data: Vec<T>) -> Result<Self, ShapeError> {
        Self::new(T::into_buffer(data), shape)
    }

    /// A grid built from equal-length rows.
    pub fn from_rows<T: Element>(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_shape_vec(vec![nrows, ncols], data)
    }

    /// A flat sequence of text cells.
    pub fn from_strs<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells = TextCells::from_strs(strings);
        let shape = vec![cells.len()];
        Self {
            buffer: Buffer::Text(cells),
            shape,
        }
    }

    /// Element kind derived from the storage.
    pub fn actual_kind(&self) -> ElementKind {
        self.buffer.kind()
    }

    /// Number of axes.
    pub fn actual_ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> Buffer {
        self.buffer
    }

    /// Borrow the elements if they are stored as `T`.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice(&self.buffer)
    }

    pub fn text(&self) -> Option<&TextCells> {
        match &self.buffer {
            Buffer::Text(cells) => Some(cells),
            _ => None,
        }
    }

    /// Equality that compares float elements by bit pattern, so `NaN == NaN`.
    pub fn bit_eq(&self, other: &RuntimeValue) -> bool {
        if self.shape != other.shape || self.actual_kind() != other.actual_kind() {
            return false;
        }
        let mut left = Vec::new();
        let mut right = Vec::new();
        crate::binary::encode_payload(&self.buffer, &mut left);
        crate::binary::encode_payload(&other.buffer, &mut right);
        left == right
    }
}
