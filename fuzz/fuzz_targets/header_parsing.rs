// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Header and payload decoding under adversarial input.
//!
//! A file claiming extents of `u64::MAX`, a text cell width that overflows,
//! a bool byte of 7: each must come back as `CorruptHeader`, never a panic
//! or an allocation sized by the header.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tagged_array::binary::{self, Header};
use tagged_array::{MismatchKind, Tag};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = binary::from_bytes_any(data) else {
        return;
    };

    // A decoded value must describe itself the way its header did.
    let (header, header_len) = Header::parse(data).expect("decoded file has a header");
    assert_eq!(value.actual_kind(), header.kind);
    assert_eq!(value.shape(), header.shape.as_slice());
    assert_eq!(Some(data.len() - header_len), header.payload_len());

    // Re-encoding a decoded value reproduces the input exactly.
    let tag = Tag::new(header.kind, header.dims);
    let bytes = binary::to_bytes(tag, &value).expect("decoded value re-encodes");
    assert_eq!(bytes, data);

    // Truncating by one byte is always corrupt.
    if let Some((_, shorter)) = data.split_last() {
        let err = binary::from_bytes_any(shorter).expect_err("truncated file decoded");
        assert_eq!(err.kind(), MismatchKind::CorruptHeader);
    }
});
