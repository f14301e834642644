// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Phantom-tagged numeric arrays with verified binary persistence.
//!
//! A tag is an element kind paired with a dimensionality (flat or grid). At
//! the type level it is a zero-sized marker such as [`ArrayInt32`] or
//! [`MatrixFloat64`]; at runtime it is a two-field [`Tag`]. Values stay
//! ordinary untyped buffers. The tag only drives checks: assert that a value
//! already is what the tag says, coerce it there, or persist it with a header
//! that is re-checked on load. [`Series`] and [`Frame`] add optional axis
//! labels on top, persisted as sidecar files next to the values.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   kind.rs   │────▶│   tag.rs     │────▶│  typed.rs    │
//! │(ElementKind,│     │ (Tag, Array* │     │  (Typed<M>,  │
//! │ Dimension.) │     │  Matrix*)    │     │   am / be)   │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  scalar.rs  │────▶│  engine.rs   │◀────│  binary/     │
//! │ (conversion │     │ (verify,     │     │ (header,     │
//! │  policy)    │     │  coerce)     │     │  payload)    │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!                            │
//!                            ▼
//!                   ┌──────────────────┐
//!                   │  contracts.rs    │
//!                   │ (debug checks)   │
//!                   └──────────────────┘
//! ```
//!
//! # Conversion policy
//!
//! | From → To        | Rule                                               |
//! |------------------|----------------------------------------------------|
//! | int → int        | wraps modulo 2^width (two's complement)            |
//! | float → int      | truncates toward zero, saturates, NaN becomes 0    |
//! | int → float      | nearest representable value                        |
//! | float → float    | IEEE-754 rounding, NaN and infinities preserved    |
//! | numeric → bool   | nonzero is true (NaN is true)                      |
//! | bool → numeric   | true is 1, false is 0                              |
//! | text ↔ anything  | `UnsupportedConversion`                            |
//!
//! # Usage
//!
//! ```ignore
//! use tagged_array::prelude::*;
//!
//! let ids = Typed::<ArrayInt32>::am(RuntimeValue::from_vec(vec![3i32, 1, 4]))?;
//! let wide = ids.convert::<ArrayFloat64>()?;
//! wide.write("ids.bin")?;
//!
//! let back = Typed::<ArrayFloat64>::read("ids.bin")?;
//! assert_eq!(back.as_slice(), &[3.0, 1.0, 4.0]);
//! ```

pub mod binary;
pub mod contracts;
pub mod engine;
pub mod error;
pub mod kind;
pub mod labeled;
pub mod scalar;
pub mod tag;
pub mod typed;
pub mod value;

pub use engine::{assert, assert_ref, coerce, coerce_ref, try_coerce, verify, Outcome};
pub use error::{MismatchKind, ParseTagError, Result, ShapeError, TagError};
pub use kind::{Dimensionality, ElementKind};
pub use labeled::{Frame, Series};
pub use scalar::{Element, Scalar};
pub use tag::{
    array_of, matrix_of, ArrayBool, ArrayFloat32, ArrayFloat64, ArrayInt16, ArrayInt32,
    ArrayInt64, ArrayInt8, ArrayText, ArrayUInt16, ArrayUInt32, ArrayUInt64, ArrayUInt8, FlatShape,
    GridShape, MatrixBool, MatrixFloat32, MatrixFloat64, MatrixInt16, MatrixInt32, MatrixInt64,
    MatrixInt8, MatrixUInt16, MatrixUInt32, MatrixUInt64, MatrixUInt8, NumericTag, ShapeSpec, Tag,
    TagSpec, TextTag,
};
pub use typed::Typed;
pub use value::{Buffer, RuntimeValue, TextCells};

/// Everything needed to declare, check and persist tagged values.
pub mod prelude {
    pub use crate::error::{MismatchKind, TagError};
    pub use crate::kind::{Dimensionality, ElementKind};
    pub use crate::labeled::*;
    pub use crate::scalar::Scalar;
    pub use crate::tag::*;
    pub use crate::typed::Typed;
    pub use crate::value::{Buffer, RuntimeValue, TextCells};
}
