// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the verification engine and codec.
//!
//! Debug-mode assertions over post-conditions that every successful path must
//! satisfy. They cost nothing in release builds and fail loudly in tests.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function             | Post-condition                                      |
//! |-------------------------------|-----------------------------------------------------|
//! | `check_outcome_matches_tag`   | result kind == tag kind, result ndim == tag arity   |
//! | `check_same_shape`            | coercion output shape == input shape                |
//! | `check_payload_len`           | encoded payload == element count x element width    |

use crate::tag::Tag;
use crate::value::RuntimeValue;

/// Check that a verified, coerced or decoded value satisfies its tag.
///
/// # Panics (debug builds only)
/// Panics if the value's kind or axis count differs from the tag.
#[inline]
pub fn check_outcome_matches_tag(tag: Tag, value: &RuntimeValue) {
    debug_assert_eq!(
        value.actual_kind(),
        tag.kind,
        "Contract violation: outcome kind {} != tag kind {}",
        value.actual_kind(),
        tag.kind
    );
    debug_assert_eq!(
        value.actual_ndim(),
        tag.arity(),
        "Contract violation: outcome ndim {} != tag arity {} ({})",
        value.actual_ndim(),
        tag.arity(),
        tag
    );
}

/// Check that coercion kept every axis extent.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_same_shape(before: &RuntimeValue, after: &RuntimeValue) {
    debug_assert_eq!(
        before.shape(),
        after.shape(),
        "Contract violation: coercion changed shape"
    );
}

/// Check that an encoded payload has exactly one element width per element.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_payload_len(value: &RuntimeValue, payload_len: usize) {
    debug_assert_eq!(
        payload_len,
        value.len() * value.buffer().element_width(),
        "Contract violation: payload is {} bytes for {} elements",
        payload_len,
        value.len()
    );
}
