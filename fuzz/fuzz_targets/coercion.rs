// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Coercion between every pair of numeric kinds on arbitrary bit patterns.
//!
//! NaN payloads, subnormals, `i64::MIN`, values just past a saturation
//! bound: the output must keep the input's shape, carry the target kind, and
//! coercing twice to the same kind must be a no-op.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagged_array::binary;
use tagged_array::engine::{self, Outcome};
use tagged_array::{Dimensionality, ElementKind, Tag};

#[derive(Debug, Arbitrary)]
struct Input {
    source: u8,
    target: u8,
    grid: bool,
    bytes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let numeric = ElementKind::NUMERIC;
    let source = numeric[input.source as usize % numeric.len()];
    let target = numeric[input.target as usize % numeric.len()];

    // Build a value by decoding the raw bytes as `source` elements; bytes
    // that do not decode (bool other than 0/1) are skipped.
    let Some(width) = source.width() else {
        return;
    };
    let count = input.bytes.len() / width;
    let (shape, tag_dims) = if input.grid && count > 0 {
        (vec![1, count], Dimensionality::Grid)
    } else {
        (vec![count], Dimensionality::Flat)
    };

    let mut encoded = vec![source.id(), shape.len() as u8];
    for extent in &shape {
        encoded.extend_from_slice(&(*extent as u64).to_le_bytes());
    }
    encoded.extend_from_slice(&input.bytes[..count * width]);
    let Ok(value) = binary::from_bytes_any(&encoded) else {
        return;
    };

    let tag = Tag::new(target, tag_dims);
    let once = engine::try_coerce(tag, value.clone())
        .expect("numeric to numeric coercion cannot fail")
        .into_value();
    assert_eq!(once.actual_kind(), target);
    assert_eq!(once.shape(), value.shape());

    let twice = engine::try_coerce(tag, once.clone()).expect("already coerced");
    assert!(matches!(twice, Outcome::Verified(_)));
    assert!(twice.value().bit_eq(&once));
});
