// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `Typed<M>`: a runtime value wrapped in a compile-time tag.
//!
//! The wrapper is the same size as the [`RuntimeValue`] inside it; the marker
//! `M` is zero-sized. Every constructor goes through the engine, so holding a
//! `Typed<ArrayInt32>` means the value was checked to be a flat `int32`
//! sequence, and the compiler keeps it from being passed where a
//! `Typed<MatrixFloat64>` is expected.
//!
//! ```ignore
//! let ids = Typed::<ArrayInt32>::am(value)?;          // assert
//! let wide = Typed::<ArrayInt64>::be(ids.into_inner())?; // coerce
//! wide.write("ids.bin")?;
//! let back = Typed::<ArrayInt64>::read("ids.bin")?;
//! ```

use std::fmt;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::path::Path;

use crate::binary;
use crate::engine;
use crate::error::{Result, ShapeError, TagError};
use crate::kind::Dimensionality;
use crate::scalar::{self, Scalar};
use crate::tag::{GridShape, NumericTag, Tag, TagSpec, TextTag};
use crate::value::{RuntimeValue, TextCells};

/// A [`RuntimeValue`] verified against the tag `M`.
pub struct Typed<M: TagSpec> {
    value: RuntimeValue,
    // fn() -> M keeps Typed Send + Sync regardless of the marker.
    _tag: PhantomData<fn() -> M>,
}

impl<M: TagSpec> Typed<M> {
    pub const TAG: Tag = M::TAG;

    fn wrap(value: RuntimeValue) -> Self {
        Self {
            value,
            _tag: PhantomData,
        }
    }

    /// Declare `value` as being of this type. The value is moved in, not copied.
    pub fn am(value: RuntimeValue) -> Result<Self> {
        engine::assert(M::TAG, value).map(Self::wrap)
    }

    /// Convert `value` to this type, copying only if its element kind differs.
    ///
    /// # Panics
    ///
    /// Panics if `value` has the wrong number of axes. See [`Typed::try_be`].
    pub fn be(value: RuntimeValue) -> Result<Self> {
        engine::coerce(M::TAG, value).map(|outcome| Self::wrap(outcome.into_value()))
    }

    /// Like [`Typed::be`], but a wrong number of axes is an error.
    pub fn try_be(value: RuntimeValue) -> Result<Self> {
        engine::try_coerce(M::TAG, value).map(|outcome| Self::wrap(outcome.into_value()))
    }

    /// Convert to another tag with the same dimensionality.
    ///
    /// The shape constraint is checked by the compiler; only text <-> numeric
    /// can fail.
    pub fn convert<N>(self) -> Result<Typed<N>>
    where
        N: TagSpec<Shape = M::Shape>,
    {
        Typed::<N>::be(self.value)
    }

    /// A value of `shape` with every element zero (or empty text).
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::filled(Scalar::Int(0), shape)
    }

    /// A value of `shape` with every element equal to `fill`, converted to this kind.
    ///
    /// For text the fill is ignored and cells are empty.
    pub fn filled(fill: Scalar, shape: &[usize]) -> Result<Self> {
        if shape.len() != M::TAG.arity() {
            return Err(TagError::DimensionMismatch {
                expected: M::TAG,
                actual_kind: M::TAG.kind,
                actual_ndim: shape.len(),
            });
        }
        let len = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| ShapeError {
                shape: shape.to_vec(),
                expected: None,
                actual: 0,
            })?;

        let buffer = scalar::filled_buffer(fill, M::TAG.kind, len);
        Self::am(RuntimeValue::new(buffer, shape.to_vec())?)
    }

    /// Read a value of this type from a file. No coercion is applied.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        binary::read_path(M::TAG, path).map(Self::wrap)
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        binary::read(M::TAG, r).map(Self::wrap)
    }

    /// Write this value to a file, replacing any existing one.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        binary::write_path(M::TAG, &self.value, path)
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        binary::write(M::TAG, &self.value, w)
    }

    pub fn value(&self) -> &RuntimeValue {
        &self.value
    }

    pub fn into_inner(self) -> RuntimeValue {
        self.value
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn dims(&self) -> Dimensionality {
        M::TAG.dims
    }
}

impl<M: NumericTag> Typed<M> {
    /// Elements in row-major order, typed by the tag.
    pub fn as_slice(&self) -> &[M::Elem] {
        let data = self.value.as_slice::<M::Elem>();
        debug_assert!(data.is_some(), "Typed<{}> holds a {} buffer", M::TAG, self.value.actual_kind());
        data.unwrap_or_default()
    }

    /// Build from a flat vector and a shape of the tag's arity.
    pub fn from_shape_vec(shape: Vec<usize>, data: Vec<M::Elem>) -> Result<Self> {
        Self::am(RuntimeValue::from_shape_vec(shape, data)?)
    }
}

impl<M: NumericTag<Shape = GridShape>> Typed<M> {
    pub fn nrows(&self) -> usize {
        self.shape()[0]
    }

    pub fn ncols(&self) -> usize {
        self.shape()[1]
    }

    /// One row of the grid.
    pub fn row(&self, index: usize) -> Option<&[M::Elem]> {
        if index >= self.nrows() {
            return None;
        }
        let ncols = self.ncols();
        self.as_slice().get(index * ncols..(index + 1) * ncols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<M::Elem> {
        if col >= self.ncols() {
            return None;
        }
        self.row(row).map(|r| r[col])
    }
}

impl<M: TextTag> Typed<M> {
    pub fn cells(&self) -> &TextCells {
        let cells = self.value.text();
        debug_assert!(cells.is_some(), "Typed<{}> holds a non-text buffer", M::TAG);
        match cells {
            Some(cells) => cells,
            None => &EMPTY_CELLS,
        }
    }
}

static EMPTY_CELLS: TextCells = TextCells::new();

impl<M: TagSpec> Clone for Typed<M> {
    fn clone(&self) -> Self {
        Self::wrap(self.value.clone())
    }
}

impl<M: TagSpec> PartialEq for Typed<M> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<M: TagSpec> fmt::Debug for Typed<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&M::TAG.type_name())
            .field("shape", &self.value.shape())
            .field("buffer", self.value.buffer())
            .finish()
    }
}

impl<M: TagSpec> TryFrom<RuntimeValue> for Typed<M> {
    type Error = TagError;

    fn try_from(value: RuntimeValue) -> Result<Self> {
        Self::am(value)
    }
}

impl<M: TagSpec> From<Typed<M>> for RuntimeValue {
    fn from(typed: Typed<M>) -> Self {
        typed.value
    }
}

impl<M: TagSpec> AsRef<RuntimeValue> for Typed<M> {
    fn as_ref(&self) -> &RuntimeValue {
        &self.value
    }
}
