//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tagged_array::{Buffer, Dimensionality, ElementKind, RuntimeValue, Scalar, TextCells};

// ============================================================================
// FIXTURES
// ============================================================================

/// `[1.5, 2.5, 3.0, NaN]` as a flat float64 sequence.
pub fn float64_example() -> RuntimeValue {
    RuntimeValue::from_vec(vec![1.5f64, 2.5, 3.0, f64::NAN])
}

/// A 2 x 3 grid of int32.
pub fn int32_grid() -> RuntimeValue {
    RuntimeValue::from_rows(vec![vec![1i32, -2, 3], vec![-4, 5, -6]]).unwrap()
}

/// Write raw bytes to `name` inside `dir`, returning the full path.
pub fn write_raw(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

pub fn arity_to_dims(ndim: usize) -> Dimensionality {
    Dimensionality::from_arity(ndim).unwrap()
}

// ============================================================================
// STRATEGIES
// ============================================================================

pub fn any_kind() -> impl Strategy<Value = ElementKind> {
    prop::sample::select(ElementKind::ALL.to_vec())
}

pub fn numeric_kind() -> impl Strategy<Value = ElementKind> {
    prop::sample::select(ElementKind::NUMERIC.to_vec())
}

pub fn any_dims() -> impl Strategy<Value = Dimensionality> {
    prop_oneof![Just(Dimensionality::Flat), Just(Dimensionality::Grid)]
}

/// A flat or grid shape, small, with zero extents included.
pub fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop_oneof![
        (0usize..16).prop_map(|n| vec![n]),
        (0usize..5, 0usize..5).prop_map(|(r, c)| vec![r, c]),
    ]
}

/// A shape with exactly `ndim` axes.
pub fn shape_with_ndim(ndim: usize) -> BoxedStrategy<Vec<usize>> {
    prop::collection::vec(0usize..5, ndim).boxed()
}

/// A value of `kind` with the given shape and arbitrary contents.
pub fn value_of(kind: ElementKind, shape: Vec<usize>) -> BoxedStrategy<RuntimeValue> {
    let len: usize = shape.iter().product();

    macro_rules! numeric {
        ($ty:ty) => {
            prop::collection::vec(any::<$ty>(), len)
                .prop_map(move |data| RuntimeValue::from_shape_vec(shape.clone(), data).unwrap())
                .boxed()
        };
    }

    match kind {
        ElementKind::Int8 => numeric!(i8),
        ElementKind::Int16 => numeric!(i16),
        ElementKind::Int32 => numeric!(i32),
        ElementKind::Int64 => numeric!(i64),
        ElementKind::UInt8 => numeric!(u8),
        ElementKind::UInt16 => numeric!(u16),
        ElementKind::UInt32 => numeric!(u32),
        ElementKind::UInt64 => numeric!(u64),
        ElementKind::Float32 => numeric!(f32),
        ElementKind::Float64 => numeric!(f64),
        ElementKind::Bool => numeric!(bool),
        ElementKind::Text => prop::collection::vec("[a-zé0-9 ]{0,6}", len)
            .prop_map(move |strings| {
                RuntimeValue::new(Buffer::Text(TextCells::from_strs(strings)), shape.clone())
                    .unwrap()
            })
            .boxed(),
    }
}

/// Any value of any kind, flat or grid.
pub fn any_value() -> impl Strategy<Value = RuntimeValue> {
    (any_kind(), shape_strategy()).prop_flat_map(|(kind, shape)| value_of(kind, shape))
}

/// Any numeric value, flat or grid.
pub fn numeric_value() -> impl Strategy<Value = RuntimeValue> {
    (numeric_kind(), shape_strategy()).prop_flat_map(|(kind, shape)| value_of(kind, shape))
}

/// Values with an axis count the engine never accepts (0 or 3).
pub fn unsupported_ndim_value() -> impl Strategy<Value = RuntimeValue> {
    (numeric_kind(), prop_oneof![Just(0usize), Just(3usize)])
        .prop_flat_map(|(kind, ndim)| (Just(kind), shape_with_ndim(ndim)))
        .prop_flat_map(|(kind, shape)| value_of(kind, shape))
}

// ============================================================================
// CONVERSION ORACLE
// ============================================================================

fn int_bounds(kind: ElementKind) -> (u32, bool) {
    match kind {
        ElementKind::Int8 => (8, true),
        ElementKind::Int16 => (16, true),
        ElementKind::Int32 => (32, true),
        ElementKind::Int64 => (64, true),
        ElementKind::UInt8 => (8, false),
        ElementKind::UInt16 => (16, false),
        ElementKind::UInt32 => (32, false),
        ElementKind::UInt64 => (64, false),
        other => panic!("{other} is not an integer kind"),
    }
}

/// Two's complement wrap of `v` into `bits`.
fn wrap(v: i128, bits: u32, signed: bool) -> i128 {
    let low = v & ((1i128 << bits) - 1);
    if signed && low >= 1i128 << (bits - 1) {
        low - (1i128 << bits)
    } else {
        low
    }
}

/// Truncate toward zero, saturate at the bounds, NaN to zero.
fn saturate(f: f64, bits: u32, signed: bool) -> i128 {
    let (min, max) = if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    };
    if f.is_nan() {
        0
    } else if f <= min as f64 {
        min
    } else if f >= max as f64 {
        max
    } else {
        f.trunc() as i128
    }
}

/// Expected result of converting one source element to `target`, written
/// independently of the crate's conversion code.
pub fn expected_conversion(src: Scalar, target: ElementKind) -> Scalar {
    match target {
        ElementKind::Bool => Scalar::Bool(match src {
            Scalar::Int(v) => v != 0,
            Scalar::Float(f) => f != 0.0,
            Scalar::Bool(b) => b,
        }),
        ElementKind::Float32 => Scalar::Float(match src {
            Scalar::Int(v) => v as f32 as f64,
            Scalar::Float(f) => f as f32 as f64,
            Scalar::Bool(b) => u8::from(b) as f64,
        }),
        ElementKind::Float64 => Scalar::Float(match src {
            Scalar::Int(v) => v as f64,
            Scalar::Float(f) => f,
            Scalar::Bool(b) => u8::from(b) as f64,
        }),
        ElementKind::Text => panic!("text has no scalar conversion"),
        int => {
            let (bits, signed) = int_bounds(int);
            Scalar::Int(match src {
                Scalar::Int(v) => wrap(v, bits, signed),
                Scalar::Float(f) => saturate(f, bits, signed),
                Scalar::Bool(b) => i128::from(b),
            })
        }
    }
}

/// Scalar equality with every NaN equal to every other NaN.
pub fn scalar_eq(a: Scalar, b: Scalar) -> bool {
    match (a, b) {
        (Scalar::Float(x), Scalar::Float(y)) => (x.is_nan() && y.is_nan()) || x == y,
        _ => a == b,
    }
}
