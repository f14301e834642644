//! Codec properties.
//!
//! - Round trip: `from_bytes(tag, to_bytes(tag, v))` is `v` bit for bit
//! - Size: the encoding is exactly header + element count x element width
//! - No coercion on load: a different declared kind is `KindMismatch`
//! - Any truncation is `CorruptHeader`, never a panic

use proptest::prelude::*;
use tagged_array::binary::{self, Header};
use tagged_array::{MismatchKind, Tag};

use crate::common::{any_kind, any_value, arity_to_dims, float64_example};

fn own_tag(value: &tagged_array::RuntimeValue) -> Tag {
    Tag::new(value.actual_kind(), arity_to_dims(value.actual_ndim()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: every value round-trips through its own tag, zero extents included.
    #[test]
    fn prop_roundtrip_bit_exact(value in any_value()) {
        let tag = own_tag(&value);
        let bytes = binary::to_bytes(tag, &value).unwrap();
        let back = binary::from_bytes(tag, &bytes).unwrap();
        prop_assert!(back.bit_eq(&value), "{:?} came back as {:?}", value, back);
    }

    /// Property: the byte count is fully determined by the header.
    #[test]
    fn prop_encoded_size(value in any_value()) {
        let bytes = binary::to_bytes(own_tag(&value), &value).unwrap();
        let (header, header_len) = Header::parse(&bytes).unwrap();
        prop_assert_eq!(header_len, header.encoded_len());
        prop_assert_eq!(header.shape.as_slice(), value.shape());
        prop_assert_eq!(
            bytes.len(),
            header_len + value.len() * value.buffer().element_width()
        );
    }

    /// Property: reading under another kind fails with KindMismatch.
    #[test]
    fn prop_read_never_coerces(value in any_value(), other in any_kind()) {
        prop_assume!(other != value.actual_kind());
        let bytes = binary::to_bytes(own_tag(&value), &value).unwrap();
        let declared = Tag::new(other, arity_to_dims(value.actual_ndim()));
        let err = binary::from_bytes(declared, &bytes).unwrap_err();
        prop_assert_eq!(err.kind(), MismatchKind::KindMismatch);
    }

    /// Property: every strict prefix of a non-empty encoding is rejected as corrupt.
    #[test]
    fn prop_truncation_is_corrupt(value in any_value(), cut in any::<prop::sample::Index>()) {
        let bytes = binary::to_bytes(own_tag(&value), &value).unwrap();
        let keep = cut.index(bytes.len());
        let err = binary::from_bytes_any(&bytes[..keep]).unwrap_err();
        prop_assert_eq!(err.kind(), MismatchKind::CorruptHeader);
    }

    /// Property: arbitrary bytes never panic the decoder.
    #[test]
    fn prop_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = binary::from_bytes_any(&bytes);
    }
}

#[test]
fn test_float64_example_roundtrips_nan_bits() {
    let value = float64_example();
    let bytes = binary::to_bytes(own_tag(&value), &value).unwrap();
    let back = binary::from_bytes(own_tag(&value), &bytes).unwrap();
    let data = back.as_slice::<f64>().unwrap();
    assert_eq!(&data[..3], &[1.5, 2.5, 3.0]);
    assert_eq!(data[3].to_bits(), f64::NAN.to_bits());
}
