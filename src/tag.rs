// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tags: an element kind paired with a dimensionality.
//!
//! A [`Tag`] is the runtime half, two bytes of plain data that drive the
//! engine's checks. The compile-time half is a zero-sized marker type per
//! named tag (`ArrayInt32`, `MatrixFloat64`, ...) implementing [`TagSpec`].
//! Markers carry no data; they exist so that `Typed<ArrayInt32>` and
//! `Typed<MatrixInt32>` are different types to the compiler.
//!
//! ```text
//!   TagSpec marker ──TAG──▶ Tag { kind, dims } ──▶ engine::verify(tag, &value)
//!   (compile time)           (runtime)               (checks actual_kind / ndim)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::{Dimensionality, ElementKind};
use crate::scalar::Element;

/// An element kind and a dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub kind: ElementKind,
    pub dims: Dimensionality,
}

impl Tag {
    pub const fn new(kind: ElementKind, dims: Dimensionality) -> Self {
        Self { kind, dims }
    }

    pub const fn flat(kind: ElementKind) -> Self {
        Self::new(kind, Dimensionality::Flat)
    }

    pub const fn grid(kind: ElementKind) -> Self {
        Self::new(kind, Dimensionality::Grid)
    }

    /// Required axis count.
    pub const fn arity(self) -> usize {
        self.dims.arity()
    }

    /// Conventional type name, e.g. `ArrayFloat32` or `MatrixBool`.
    pub fn type_name(self) -> String {
        let prefix = match self.dims {
            Dimensionality::Flat => "Array",
            Dimensionality::Grid => "Matrix",
        };
        let suffix = match self.kind {
            ElementKind::Int8 => "Int8",
            ElementKind::Int16 => "Int16",
            ElementKind::Int32 => "Int32",
            ElementKind::Int64 => "Int64",
            ElementKind::UInt8 => "UInt8",
            ElementKind::UInt16 => "UInt16",
            ElementKind::UInt32 => "UInt32",
            ElementKind::UInt64 => "UInt64",
            ElementKind::Float32 => "Float32",
            ElementKind::Float64 => "Float64",
            ElementKind::Bool => "Bool",
            ElementKind::Text => "Text",
        };
        format!("{prefix}{suffix}")
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.dims, self.kind)
    }
}

/// The flat tag for `kind`. Every kind has one.
pub const fn array_of(kind: ElementKind) -> Tag {
    Tag::flat(kind)
}

/// The grid tag for `kind`, or `None` for text (there is no named text grid).
pub const fn matrix_of(kind: ElementKind) -> Option<Tag> {
    match kind {
        ElementKind::Text => None,
        _ => Some(Tag::grid(kind)),
    }
}

// ============================================================================
// COMPILE-TIME MARKERS
// ============================================================================

/// Axis-count marker carried by every [`TagSpec`].
pub trait ShapeSpec: 'static {
    const DIMS: Dimensionality;
}

/// One axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlatShape;

/// Two axes, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridShape;

impl ShapeSpec for FlatShape {
    const DIMS: Dimensionality = Dimensionality::Flat;
}

impl ShapeSpec for GridShape {
    const DIMS: Dimensionality = Dimensionality::Grid;
}

/// A named tag known at compile time.
pub trait TagSpec: 'static {
    const TAG: Tag;
    type Shape: ShapeSpec;
}

/// A tag whose elements are a numeric [`Element`] type.
pub trait NumericTag: TagSpec {
    type Elem: Element;
}

/// A tag whose elements are text cells.
pub trait TextTag: TagSpec {}

macro_rules! numeric_tags {
    ($( $(#[$doc:meta])* $name:ident => ($elem:ty, $shape:ident) ),* $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl TagSpec for $name {
                const TAG: Tag = Tag::new(<$elem as Element>::KIND, <$shape as ShapeSpec>::DIMS);
                type Shape = $shape;
            }

            impl NumericTag for $name {
                type Elem = $elem;
            }
        )*
    };
}

numeric_tags! {
    /// An array of booleans.
    ArrayBool => (bool, FlatShape),
    /// A matrix of booleans.
    MatrixBool => (bool, GridShape),
    /// An array of 8-bit integers.
    ArrayInt8 => (i8, FlatShape),
    /// A matrix of 8-bit integers.
    MatrixInt8 => (i8, GridShape),
    /// An array of 16-bit integers.
    ArrayInt16 => (i16, FlatShape),
    /// A matrix of 16-bit integers.
    MatrixInt16 => (i16, GridShape),
    /// An array of 32-bit integers.
    ArrayInt32 => (i32, FlatShape),
    /// A matrix of 32-bit integers.
    MatrixInt32 => (i32, GridShape),
    /// An array of 64-bit integers.
    ArrayInt64 => (i64, FlatShape),
    /// A matrix of 64-bit integers.
    MatrixInt64 => (i64, GridShape),
    /// An array of 8-bit unsigned integers.
    ArrayUInt8 => (u8, FlatShape),
    /// A matrix of 8-bit unsigned integers.
    MatrixUInt8 => (u8, GridShape),
    /// An array of 16-bit unsigned integers.
    ArrayUInt16 => (u16, FlatShape),
    /// A matrix of 16-bit unsigned integers.
    MatrixUInt16 => (u16, GridShape),
    /// An array of 32-bit unsigned integers.
    ArrayUInt32 => (u32, FlatShape),
    /// A matrix of 32-bit unsigned integers.
    MatrixUInt32 => (u32, GridShape),
    /// An array of 64-bit unsigned integers.
    ArrayUInt64 => (u64, FlatShape),
    /// A matrix of 64-bit unsigned integers.
    MatrixUInt64 => (u64, GridShape),
    /// An array of 32-bit floating point numbers.
    ArrayFloat32 => (f32, FlatShape),
    /// A matrix of 32-bit floating point numbers.
    MatrixFloat32 => (f32, GridShape),
    /// An array of 64-bit floating point numbers.
    ArrayFloat64 => (f64, FlatShape),
    /// A matrix of 64-bit floating point numbers.
    MatrixFloat64 => (f64, GridShape),
}

/// An array of fixed-width text cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArrayText;

impl TagSpec for ArrayText {
    const TAG: Tag = Tag::flat(ElementKind::Text);
    type Shape = FlatShape;
}

impl TextTag for ArrayText {}
