//! Assert properties.
//!
//! 1. **Iff**: assert succeeds exactly when kind and axis count both match
//! 2. **Precedence**: when both differ, the failure is always `KindMismatch`
//! 3. **Idempotence**: re-asserting a verified value returns it unchanged

use proptest::prelude::*;
use tagged_array::engine;
use tagged_array::{MismatchKind, Tag};

use crate::common::{any_dims, any_kind, any_value, unsupported_ndim_value};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: assert(tag, v) succeeds iff kind and arity both match.
    #[test]
    fn prop_assert_iff_matches(value in any_value(), kind in any_kind(), dims in any_dims()) {
        let tag = Tag::new(kind, dims);
        let matches = value.actual_kind() == kind && value.actual_ndim() == dims.arity();
        let result = engine::assert(tag, value.clone());

        prop_assert_eq!(result.is_ok(), matches);
        match result {
            Ok(back) => prop_assert!(back.bit_eq(&value)),
            Err(err) => {
                let expected = if value.actual_kind() != kind {
                    MismatchKind::KindMismatch
                } else {
                    MismatchKind::DimensionMismatch
                };
                prop_assert_eq!(err.kind(), expected);
            }
        }
    }

    /// Property: assert never looks at extents, only their count.
    #[test]
    fn prop_assert_ignores_extents(value in any_value()) {
        let dims = crate::common::arity_to_dims(value.actual_ndim());
        prop_assert!(engine::verify(Tag::new(value.actual_kind(), dims), &value).is_ok());
    }

    /// Property: 0 or 3 axes never verify against any tag.
    #[test]
    fn prop_unsupported_ndim_never_verifies(value in unsupported_ndim_value(), dims in any_dims()) {
        let err = engine::verify(Tag::new(value.actual_kind(), dims), &value).unwrap_err();
        prop_assert_eq!(err.kind(), MismatchKind::DimensionMismatch);
    }

    /// Property: assert(tag, assert(tag, v)) == assert(tag, v), without copying.
    #[test]
    fn prop_assert_idempotent(value in any_value()) {
        let tag = Tag::new(value.actual_kind(), crate::common::arity_to_dims(value.actual_ndim()));
        let once = engine::assert(tag, value).unwrap();
        let snapshot = once.clone();
        let twice = engine::assert(tag, once).unwrap();
        prop_assert!(twice.bit_eq(&snapshot));
    }
}
