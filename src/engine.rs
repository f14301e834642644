// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Verification and coercion of runtime values against tags.
//!
//! Two operations, both pure functions of `(tag, value)`:
//!
//! - **assert**: return the value untouched if its kind and axis count match
//!   the tag, otherwise fail. Kind is checked before dimensionality, always.
//! - **coerce**: like assert, but a kind mismatch is repaired by allocating a
//!   converted copy. A dimensionality mismatch is never repaired: inventing or
//!   dropping an axis is the caller's decision, so [`coerce`] panics and
//!   [`try_coerce`] returns `DimensionMismatch`.
//!
//! Shape extents are never inspected beyond their count. An empty array
//! verifies as readily as a full one.
//!
//! | Input state               | `assert`            | `coerce`                |
//! |---------------------------|---------------------|-------------------------|
//! | kind ok, ndim ok          | same value          | `Verified(same)`        |
//! | kind differs, ndim ok     | `KindMismatch`      | `Coerced(copy)`         |
//! | kind ok, ndim differs     | `DimensionMismatch` | panic                   |
//! | both differ               | `KindMismatch`      | panic                   |
//! | text <-> numeric, ndim ok | `KindMismatch`      | `UnsupportedConversion` |

use std::borrow::Cow;

use crate::contracts;
use crate::error::{Result, TagError};
use crate::tag::Tag;
use crate::value::RuntimeValue;

/// Result of a successful coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The input already matched; this is the same value, not a copy.
    Verified(RuntimeValue),
    /// A freshly allocated value with every element converted.
    Coerced(RuntimeValue),
}

impl Outcome {
    pub fn value(&self) -> &RuntimeValue {
        match self {
            Outcome::Verified(value) | Outcome::Coerced(value) => value,
        }
    }

    pub fn into_value(self) -> RuntimeValue {
        match self {
            Outcome::Verified(value) | Outcome::Coerced(value) => value,
        }
    }

    pub fn is_coerced(&self) -> bool {
        matches!(self, Outcome::Coerced(_))
    }
}

/// Check `value` against `tag` without consuming it.
pub fn verify(tag: Tag, value: &RuntimeValue) -> Result<()> {
    let actual_kind = value.actual_kind();
    let actual_ndim = value.actual_ndim();

    if actual_kind != tag.kind {
        return Err(TagError::KindMismatch {
            expected: tag,
            actual_kind,
            actual_ndim,
        });
    }
    if actual_ndim != tag.arity() {
        return Err(TagError::DimensionMismatch {
            expected: tag,
            actual_kind,
            actual_ndim,
        });
    }

    tracing::trace!(tag = %tag, shape = ?value.shape(), "verified");
    Ok(())
}

/// Declare that `value` is of `tag`. Returns the same value on success.
pub fn assert(tag: Tag, value: RuntimeValue) -> Result<RuntimeValue> {
    verify(tag, &value)?;
    contracts::check_outcome_matches_tag(tag, &value);
    Ok(value)
}

/// Borrowing form of [`assert`]; the returned reference is `value` itself.
pub fn assert_ref(tag: Tag, value: &RuntimeValue) -> Result<&RuntimeValue> {
    verify(tag, value)?;
    Ok(value)
}

/// Convert `value` to `tag`'s element kind, keeping its shape.
///
/// # Panics
///
/// Panics if `value` does not have exactly `tag.arity()` axes. Use
/// [`try_coerce`] for values whose dimensionality is not under the caller's
/// control.
pub fn coerce(tag: Tag, value: RuntimeValue) -> Result<Outcome> {
    match try_coerce(tag, value) {
        Err(TagError::DimensionMismatch {
            expected,
            actual_kind,
            actual_ndim,
        }) => panic!(
            "cannot coerce a {}-dimensional {} value to {}: coercion never changes dimensionality",
            actual_ndim, actual_kind, expected
        ),
        other => other,
    }
}

/// Like [`coerce`], but reports a dimensionality mismatch as an error.
pub fn try_coerce(tag: Tag, value: RuntimeValue) -> Result<Outcome> {
    if value.actual_ndim() != tag.arity() {
        return Err(TagError::DimensionMismatch {
            expected: tag,
            actual_kind: value.actual_kind(),
            actual_ndim: value.actual_ndim(),
        });
    }
    if value.actual_kind() == tag.kind {
        contracts::check_outcome_matches_tag(tag, &value);
        return Ok(Outcome::Verified(value));
    }

    let converted = convert(tag, &value)?;
    Ok(Outcome::Coerced(converted))
}

/// Borrowing form of [`coerce`]: `Cow::Borrowed(value)` if it already matches.
///
/// # Panics
///
/// Same condition as [`coerce`].
pub fn coerce_ref(tag: Tag, value: &RuntimeValue) -> Result<Cow<'_, RuntimeValue>> {
    if value.actual_ndim() != tag.arity() {
        panic!(
            "cannot coerce a {}-dimensional {} value to {}: coercion never changes dimensionality",
            value.actual_ndim(),
            value.actual_kind(),
            tag
        );
    }
    if value.actual_kind() == tag.kind {
        return Ok(Cow::Borrowed(value));
    }
    convert(tag, value).map(Cow::Owned)
}

/// Allocate a copy of `value` with every element converted to `tag.kind`.
fn convert(tag: Tag, value: &RuntimeValue) -> Result<RuntimeValue> {
    let from = value.actual_kind();
    let unsupported = TagError::UnsupportedConversion { from, to: tag.kind };
    if !from.converts_to(tag.kind) {
        return Err(unsupported);
    }
    let buffer = value.buffer().convert_to(tag.kind).ok_or(unsupported)?;

    let converted = RuntimeValue::new(buffer, value.shape().to_vec())?;

    tracing::debug!(
        from = %from,
        to = %tag.kind,
        elements = converted.len(),
        shape = ?converted.shape(),
        "coerced value to new element kind"
    );
    contracts::check_outcome_matches_tag(tag, &converted);
    contracts::check_same_shape(value, &converted);
    Ok(converted)
}
