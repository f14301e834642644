// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-kind conversion functions: the value-domain half of the kind registry.
//!
//! Conversions go through [`Scalar`], a three-armed union wide enough to hold
//! any element of any numeric kind exactly (`i128` covers both `i64` and
//! `u64`, `f64` covers `f32`). Converting out of a `Scalar` is then one
//! closed match per target type.
//!
//! # Conversion policy
//!
//! | From → To         | Rule                                                      |
//! |-------------------|-----------------------------------------------------------|
//! | int → int         | two's-complement **wrap** to the target width             |
//! | float → int       | truncate toward zero; saturate out of range; `NaN` → `0`  |
//! | int → float       | round to nearest (exact except 64-bit int → `f32`)        |
//! | float → float     | round to nearest; `NaN` stays `NaN`                       |
//! | bool → numeric    | `true` → 1, `false` → 0                                   |
//! | numeric → bool    | nonzero → `true` (so `NaN` → `true`)                      |
//!
//! Text is not a `Scalar`; it never converts to or from a numeric kind.

use std::fmt;

use crate::kind::ElementKind;
use crate::value::{Buffer, TextCells};

/// A single element of any numeric kind, held without loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i128),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Bool(v) => write!(f, "{v}"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Native Rust storage type of one numeric [`ElementKind`].
///
/// Sealed: the kind set is closed.
pub trait Element: Copy + Send + Sync + PartialEq + std::fmt::Debug + 'static + sealed::Sealed {
    const KIND: ElementKind;
    /// Encoded size in bytes.
    const WIDTH: usize;

    fn to_scalar(self) -> Scalar;
    fn from_scalar(scalar: Scalar) -> Self;

    /// Append the little-endian encoding of `self`.
    fn put_le(self, out: &mut Vec<u8>);
    /// Decode from exactly `WIDTH` little-endian bytes. `None` if the bytes
    /// are not a valid encoding (only possible for `bool`).
    fn get_le(bytes: &[u8]) -> Option<Self>;

    fn into_buffer(data: Vec<Self>) -> Buffer;
    fn slice(buffer: &Buffer) -> Option<&[Self]>;
}

macro_rules! impl_element_int {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;
            const WIDTH: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::Int(self as i128)
            }

            #[inline]
            fn from_scalar(scalar: Scalar) -> Self {
                match scalar {
                    // i128 -> narrower int keeps the low bits: wrap.
                    Scalar::Int(v) => v as $ty,
                    // float -> int `as` truncates toward zero, saturates, maps NaN to 0.
                    Scalar::Float(v) => v as $ty,
                    Scalar::Bool(b) => b as $ty,
                }
            }

            #[inline]
            fn put_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn get_le(bytes: &[u8]) -> Option<Self> {
                Some(<$ty>::from_le_bytes(bytes.try_into().ok()?))
            }

            fn into_buffer(data: Vec<Self>) -> Buffer {
                Buffer::$variant(data)
            }

            fn slice(buffer: &Buffer) -> Option<&[Self]> {
                match buffer {
                    Buffer::$variant(data) => Some(data),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! impl_element_float {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;
            const WIDTH: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn to_scalar(self) -> Scalar {
                Scalar::Float(self as f64)
            }

            #[inline]
            fn from_scalar(scalar: Scalar) -> Self {
                match scalar {
                    Scalar::Int(v) => v as $ty,
                    Scalar::Float(v) => v as $ty,
                    Scalar::Bool(b) => {
                        if b {
                            1.0
                        } else {
                            0.0
                        }
                    }
                }
            }

            #[inline]
            fn put_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn get_le(bytes: &[u8]) -> Option<Self> {
                Some(<$ty>::from_le_bytes(bytes.try_into().ok()?))
            }

            fn into_buffer(data: Vec<Self>) -> Buffer {
                Buffer::$variant(data)
            }

            fn slice(buffer: &Buffer) -> Option<&[Self]> {
                match buffer {
                    Buffer::$variant(data) => Some(data),
                    _ => None,
                }
            }
        }
    };
}

impl_element_int!(i8, Int8, Int8);
impl_element_int!(i16, Int16, Int16);
impl_element_int!(i32, Int32, Int32);
impl_element_int!(i64, Int64, Int64);
impl_element_int!(u8, UInt8, UInt8);
impl_element_int!(u16, UInt16, UInt16);
impl_element_int!(u32, UInt32, UInt32);
impl_element_int!(u64, UInt64, UInt64);
impl_element_float!(f32, Float32, Float32);
impl_element_float!(f64, Float64, Float64);

impl sealed::Sealed for bool {}

impl Element for bool {
    const KIND: ElementKind = ElementKind::Bool;
    const WIDTH: usize = 1;

    #[inline]
    fn to_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }

    #[inline]
    fn from_scalar(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Int(v) => v != 0,
            Scalar::Float(v) => v != 0.0,
            Scalar::Bool(b) => b,
        }
    }

    #[inline]
    fn put_le(self, out: &mut Vec<u8>) {
        out.push(u8::from(self));
    }

    #[inline]
    fn get_le(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0] => Some(false),
            [1] => Some(true),
            _ => None,
        }
    }

    fn into_buffer(data: Vec<Self>) -> Buffer {
        Buffer::Bool(data)
    }

    fn slice(buffer: &Buffer) -> Option<&[Self]> {
        match buffer {
            Buffer::Bool(data) => Some(data),
            _ => None,
        }
    }
}

// ============================================================================
// SLICE CONVERSION
// ============================================================================

/// Buffers at least this long are converted on the rayon pool.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Convert every element of `src` into `T`, preserving order.
pub fn convert_slice<S: Element, T: Element>(src: &[S]) -> Vec<T> {
    #[cfg(feature = "parallel")]
    if src.len() >= PARALLEL_THRESHOLD {
        use rayon::prelude::*;
        return src
            .par_iter()
            .map(|&x| T::from_scalar(x.to_scalar()))
            .collect();
    }

    src.iter().map(|&x| T::from_scalar(x.to_scalar())).collect()
}

/// Convert a numeric slice into a freshly allocated buffer of `target` kind.
///
/// Returns `None` when `target` is text.
pub(crate) fn convert_into<S: Element>(src: &[S], target: ElementKind) -> Option<Buffer> {
    Some(match target {
        ElementKind::Int8 => Buffer::Int8(convert_slice(src)),
        ElementKind::Int16 => Buffer::Int16(convert_slice(src)),
        ElementKind::Int32 => Buffer::Int32(convert_slice(src)),
        ElementKind::Int64 => Buffer::Int64(convert_slice(src)),
        ElementKind::UInt8 => Buffer::UInt8(convert_slice(src)),
        ElementKind::UInt16 => Buffer::UInt16(convert_slice(src)),
        ElementKind::UInt32 => Buffer::UInt32(convert_slice(src)),
        ElementKind::UInt64 => Buffer::UInt64(convert_slice(src)),
        ElementKind::Float32 => Buffer::Float32(convert_slice(src)),
        ElementKind::Float64 => Buffer::Float64(convert_slice(src)),
        ElementKind::Bool => Buffer::Bool(convert_slice(src)),
        ElementKind::Text => return None,
    })
}

/// A buffer of `len` copies of `scalar`, converted to `target` kind.
///
/// Text has no conversion from a scalar; it gets `len` empty cells.
pub(crate) fn filled_buffer(scalar: Scalar, target: ElementKind, len: usize) -> Buffer {
    fn fill<T: Element>(scalar: Scalar, len: usize) -> Buffer {
        T::into_buffer(vec![T::from_scalar(scalar); len])
    }

    match target {
        ElementKind::Int8 => fill::<i8>(scalar, len),
        ElementKind::Int16 => fill::<i16>(scalar, len),
        ElementKind::Int32 => fill::<i32>(scalar, len),
        ElementKind::Int64 => fill::<i64>(scalar, len),
        ElementKind::UInt8 => fill::<u8>(scalar, len),
        ElementKind::UInt16 => fill::<u16>(scalar, len),
        ElementKind::UInt32 => fill::<u32>(scalar, len),
        ElementKind::UInt64 => fill::<u64>(scalar, len),
        ElementKind::Float32 => fill::<f32>(scalar, len),
        ElementKind::Float64 => fill::<f64>(scalar, len),
        ElementKind::Bool => fill::<bool>(scalar, len),
        ElementKind::Text => Buffer::Text(TextCells::empty(0, len)),
    }
}
