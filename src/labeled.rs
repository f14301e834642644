// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Labelled values: a series (flat) or frame (grid) with axis labels.
//!
//! A [`Series`] is a `Typed<M>` over a flat tag plus optional row labels. A
//! [`Frame`] is a `Typed<M>` over a grid tag plus optional row and column
//! labels. Labels are flat values of any element kind, one per position along
//! their axis. Absent labels mean positional labels `0..n`, and labels that
//! spell out exactly `0..n` are normalized to absent.
//!
//! # Files
//!
//! ```text
//!   scores.bin            the values, tagged as usual
//!   scores.bin.index      row labels, only if not positional
//!   scores.bin.columns    column labels (frames only), only if not positional
//! ```
//!
//! Sidecars are ordinary tagged files. On load each one is re-checked: it
//! must be flat and as long as its axis. Writing positional labels removes a
//! stale sidecar left by an earlier write to the same path.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::binary;
use crate::engine;
use crate::error::{Result, ShapeError};
use crate::kind::Dimensionality;
use crate::scalar::Scalar;
use crate::tag::{
    ArrayBool, ArrayFloat32, ArrayFloat64, ArrayInt16, ArrayInt32, ArrayInt64, ArrayInt8,
    ArrayText, ArrayUInt16, ArrayUInt32, ArrayUInt64, ArrayUInt8, FlatShape, GridShape,
    MatrixBool, MatrixFloat32, MatrixFloat64, MatrixInt16, MatrixInt32, MatrixInt64, MatrixInt8,
    MatrixUInt16, MatrixUInt32, MatrixUInt64, MatrixUInt8, Tag, TagSpec,
};
use crate::typed::Typed;
use crate::value::RuntimeValue;

/// Suffix of the row label sidecar.
pub const INDEX_SUFFIX: &str = ".index";

/// Suffix of the column label sidecar.
pub const COLUMNS_SUFFIX: &str = ".columns";

// ============================================================================
// LABELS
// ============================================================================

/// Whether `labels` are the integers `0..n` in order.
fn is_positional(labels: &RuntimeValue) -> bool {
    let buffer = labels.buffer();
    labels.actual_kind().is_integer()
        && (0..labels.len()).all(|i| buffer.scalar_at(i) == Some(Scalar::Int(i as i128)))
}

/// Check `labels` against an axis of length `extent`.
///
/// Returns `None` for positional labels.
fn check_labels(labels: RuntimeValue, extent: usize) -> Result<Option<RuntimeValue>> {
    let labels = engine::assert(labels_tag(&labels), labels)?;
    if labels.len() != extent {
        return Err(ShapeError {
            shape: vec![extent],
            expected: Some(extent),
            actual: labels.len(),
        }
        .into());
    }
    Ok((!is_positional(&labels)).then_some(labels))
}

fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn write_labels(labels: Option<&RuntimeValue>, path: &Path) -> Result<()> {
    match labels {
        Some(labels) => binary::write_path(labels_tag(labels), labels, path),
        None => match fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed stale label sidecar");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        },
    }
}

fn read_labels(path: &Path, extent: usize) -> Result<Option<RuntimeValue>> {
    if !binary::exists(path) {
        return Ok(None);
    }
    let labels = binary::read_any_path(path)?;
    tracing::debug!(
        path = %path.display(),
        kind = %labels.actual_kind(),
        len = labels.len(),
        "read label sidecar"
    );
    check_labels(labels, extent)
}

/// Labels may be of any kind; only their axis count is checked.
fn labels_tag(labels: &RuntimeValue) -> Tag {
    Tag::new(labels.actual_kind(), Dimensionality::Flat)
}

// ============================================================================
// SERIES
// ============================================================================

/// A flat tagged value with optional row labels.
pub struct Series<M: TagSpec<Shape = FlatShape>> {
    values: Typed<M>,
    index: Option<RuntimeValue>,
}

impl<M: TagSpec<Shape = FlatShape>> Series<M> {
    /// Wrap already verified values with positional labels.
    pub fn new(values: Typed<M>) -> Self {
        Self {
            values,
            index: None,
        }
    }

    /// Declare `value` as a series of this type.
    pub fn am(value: RuntimeValue) -> Result<Self> {
        Typed::am(value).map(Self::new)
    }

    /// Convert `value` to a series of this type.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not flat, like [`Typed::be`].
    pub fn be(value: RuntimeValue) -> Result<Self> {
        Typed::be(value).map(Self::new)
    }

    /// Replace the row labels. They must be flat and one per element.
    pub fn with_index(mut self, labels: RuntimeValue) -> Result<Self> {
        self.index = check_labels(labels, self.values.len())?;
        Ok(self)
    }

    /// Row labels, or `None` if they are positional.
    pub fn index(&self) -> Option<&RuntimeValue> {
        self.index.as_ref()
    }

    pub fn values(&self) -> &Typed<M> {
        &self.values
    }

    pub fn into_values(self) -> Typed<M> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read a series, picking up row labels from `<path>.index` if present.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let values = Typed::<M>::read(path)?;
        let index = read_labels(&sidecar(path, INDEX_SUFFIX), values.len())?;
        Ok(Self { values, index })
    }

    /// Write the series, plus `<path>.index` if the row labels are not positional.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.values.write(path)?;
        write_labels(self.index.as_ref(), &sidecar(path, INDEX_SUFFIX))
    }
}

impl<M: TagSpec<Shape = FlatShape>> Clone for Series<M> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            index: self.index.clone(),
        }
    }
}

impl<M: TagSpec<Shape = FlatShape>> PartialEq for Series<M> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.index == other.index
    }
}

impl<M: TagSpec<Shape = FlatShape>> fmt::Debug for Series<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("values", &self.values)
            .field("index", &self.index)
            .finish()
    }
}

// ============================================================================
// FRAME
// ============================================================================

/// A grid tagged value with optional row and column labels.
pub struct Frame<M: TagSpec<Shape = GridShape>> {
    values: Typed<M>,
    index: Option<RuntimeValue>,
    columns: Option<RuntimeValue>,
}

impl<M: TagSpec<Shape = GridShape>> Frame<M> {
    /// Wrap already verified values with positional labels.
    pub fn new(values: Typed<M>) -> Self {
        Self {
            values,
            index: None,
            columns: None,
        }
    }

    /// Declare `value` as a frame of this type.
    pub fn am(value: RuntimeValue) -> Result<Self> {
        Typed::am(value).map(Self::new)
    }

    /// Convert `value` to a frame of this type.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a grid, like [`Typed::be`].
    pub fn be(value: RuntimeValue) -> Result<Self> {
        Typed::be(value).map(Self::new)
    }

    /// Replace the row labels. They must be flat and one per row.
    pub fn with_index(mut self, labels: RuntimeValue) -> Result<Self> {
        self.index = check_labels(labels, self.nrows())?;
        Ok(self)
    }

    /// Replace the column labels. They must be flat and one per column.
    pub fn with_columns(mut self, labels: RuntimeValue) -> Result<Self> {
        self.columns = check_labels(labels, self.ncols())?;
        Ok(self)
    }

    pub fn index(&self) -> Option<&RuntimeValue> {
        self.index.as_ref()
    }

    pub fn columns(&self) -> Option<&RuntimeValue> {
        self.columns.as_ref()
    }

    pub fn values(&self) -> &Typed<M> {
        &self.values
    }

    pub fn into_values(self) -> Typed<M> {
        self.values
    }

    pub fn nrows(&self) -> usize {
        self.values.shape()[0]
    }

    pub fn ncols(&self) -> usize {
        self.values.shape()[1]
    }

    /// Read a frame, picking up `<path>.index` and `<path>.columns` if present.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let values = Typed::<M>::read(path)?;
        let (nrows, ncols) = (values.shape()[0], values.shape()[1]);
        let index = read_labels(&sidecar(path, INDEX_SUFFIX), nrows)?;
        let columns = read_labels(&sidecar(path, COLUMNS_SUFFIX), ncols)?;
        Ok(Self {
            values,
            index,
            columns,
        })
    }

    /// Write the frame, plus a sidecar for each axis whose labels are not positional.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.values.write(path)?;
        write_labels(self.index.as_ref(), &sidecar(path, INDEX_SUFFIX))?;
        write_labels(self.columns.as_ref(), &sidecar(path, COLUMNS_SUFFIX))
    }
}

impl<M: TagSpec<Shape = GridShape>> Clone for Frame<M> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            index: self.index.clone(),
            columns: self.columns.clone(),
        }
    }
}

impl<M: TagSpec<Shape = GridShape>> PartialEq for Frame<M> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.index == other.index && self.columns == other.columns
    }
}

impl<M: TagSpec<Shape = GridShape>> fmt::Debug for Frame<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("values", &self.values)
            .field("index", &self.index)
            .field("columns", &self.columns)
            .finish()
    }
}

// ============================================================================
// NAMED TYPES
// ============================================================================

pub type SeriesBool = Series<ArrayBool>;
pub type SeriesInt8 = Series<ArrayInt8>;
pub type SeriesInt16 = Series<ArrayInt16>;
pub type SeriesInt32 = Series<ArrayInt32>;
pub type SeriesInt64 = Series<ArrayInt64>;
pub type SeriesUInt8 = Series<ArrayUInt8>;
pub type SeriesUInt16 = Series<ArrayUInt16>;
pub type SeriesUInt32 = Series<ArrayUInt32>;
pub type SeriesUInt64 = Series<ArrayUInt64>;
pub type SeriesFloat32 = Series<ArrayFloat32>;
pub type SeriesFloat64 = Series<ArrayFloat64>;
pub type SeriesText = Series<ArrayText>;

pub type FrameBool = Frame<MatrixBool>;
pub type FrameInt8 = Frame<MatrixInt8>;
pub type FrameInt16 = Frame<MatrixInt16>;
pub type FrameInt32 = Frame<MatrixInt32>;
pub type FrameInt64 = Frame<MatrixInt64>;
pub type FrameUInt8 = Frame<MatrixUInt8>;
pub type FrameUInt16 = Frame<MatrixUInt16>;
pub type FrameUInt32 = Frame<MatrixUInt32>;
pub type FrameUInt64 = Frame<MatrixUInt64>;
pub type FrameFloat32 = Frame<MatrixFloat32>;
pub type FrameFloat64 = Frame<MatrixFloat64>;
