// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Failure taxonomy for verification, coercion and the binary codec.
//!
//! Every failure carries enough context to say what was expected and what was
//! found. Nothing in this crate turns an error into a log line and carries on.

use std::io;

use thiserror::Error;

use crate::kind::ElementKind;
use crate::tag::Tag;

/// Plain discriminant of a [`TagError`], for callers that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchKind {
    KindMismatch,
    DimensionMismatch,
    UnsupportedConversion,
    CorruptHeader,
    IoFailure,
    /// Raised only by constructors, never by assert, coerce or read.
    InvalidShape,
}

/// All errors returned by `tagged-array`.
#[derive(Debug, Error)]
pub enum TagError {
    /// The value's element kind differs from the tag's. Checked before dimensionality.
    #[error("unexpected data type: {actual_kind} instead of: {} for {expected}", .expected.kind)]
    KindMismatch {
        expected: Tag,
        actual_kind: ElementKind,
        actual_ndim: usize,
    },

    /// The value's axis count differs from the tag's dimensionality.
    #[error("unexpected dimensions: {actual_ndim} instead of: {} for {expected}", .expected.dims.arity())]
    DimensionMismatch {
        expected: Tag,
        actual_kind: ElementKind,
        actual_ndim: usize,
    },

    /// No conversion is defined between the two kinds (text <-> numeric).
    #[error("unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: ElementKind, to: ElementKind },

    /// The header or payload of a persisted value is malformed.
    #[error("corrupt header: {reason}")]
    CorruptHeader { reason: String },

    /// Propagated unchanged from the underlying reader or writer.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A constructor was given data that does not fill the requested shape.
    #[error(transparent)]
    InvalidShape(#[from] ShapeError),
}

impl TagError {
    pub fn kind(&self) -> MismatchKind {
        match self {
            TagError::KindMismatch { .. } => MismatchKind::KindMismatch,
            TagError::DimensionMismatch { .. } => MismatchKind::DimensionMismatch,
            TagError::UnsupportedConversion { .. } => MismatchKind::UnsupportedConversion,
            TagError::CorruptHeader { .. } => MismatchKind::CorruptHeader,
            TagError::Io(_) => MismatchKind::IoFailure,
            TagError::InvalidShape(_) => MismatchKind::InvalidShape,
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        TagError::CorruptHeader {
            reason: reason.into(),
        }
    }
}

/// A buffer and a shape that do not describe the same number of elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shape {shape:?} does not fit a buffer of {actual} elements")]
pub struct ShapeError {
    pub shape: Vec<usize>,
    /// Element count implied by `shape`; `None` if the product overflows.
    pub expected: Option<usize>,
    pub actual: usize,
}

/// Failure to parse a kind or dimensionality name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTagError {
    #[error("unknown element kind: {0:?}")]
    UnknownKind(String),
    #[error("unknown dimensionality: {0:?} (expected flat or grid)")]
    UnknownDimensionality(String),
}

/// Convenience alias used throughout `tagged-array`.
pub type Result<T> = std::result::Result<T, TagError>;
