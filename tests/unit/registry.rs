//! Element kinds, dimensionalities and tag names.

use tagged_array::{
    array_of, matrix_of, ArrayText, Dimensionality, ElementKind, MatrixFloat64, MatrixUInt16,
    ParseTagError, Tag, TagSpec,
};

#[test]
fn test_wire_ids_are_stable() {
    let ids: Vec<u8> = ElementKind::ALL.iter().map(|k| k.id()).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<u8>>());
    assert_eq!(ElementKind::Float64.id(), 10);
    assert_eq!(ElementKind::from_id(0), None);
    assert_eq!(ElementKind::from_id(13), None);
}

#[test]
fn test_widths() {
    assert_eq!(ElementKind::Bool.width(), Some(1));
    assert_eq!(ElementKind::UInt16.width(), Some(2));
    assert_eq!(ElementKind::Float32.width(), Some(4));
    assert_eq!(ElementKind::Int64.width(), Some(8));
    assert_eq!(ElementKind::Text.width(), None);
}

#[test]
fn test_name_aliases() {
    assert_eq!("str".parse::<ElementKind>().unwrap(), ElementKind::Text);
    assert_eq!("float64".parse::<ElementKind>().unwrap(), ElementKind::Float64);
    assert_eq!(
        "complex128".parse::<ElementKind>(),
        Err(ParseTagError::UnknownKind("complex128".to_string()))
    );
    assert_eq!("matrix".parse::<Dimensionality>().unwrap(), Dimensionality::Grid);
    assert!("cube".parse::<Dimensionality>().is_err());
}

#[test]
fn test_only_flat_and_grid_exist() {
    assert_eq!(Dimensionality::from_arity(0), None);
    assert_eq!(Dimensionality::from_arity(1), Some(Dimensionality::Flat));
    assert_eq!(Dimensionality::from_arity(2), Some(Dimensionality::Grid));
    assert_eq!(Dimensionality::from_arity(3), None);
}

#[test]
fn test_named_markers_match_runtime_tags() {
    assert_eq!(MatrixFloat64::TAG, Tag::grid(ElementKind::Float64));
    assert_eq!(MatrixUInt16::TAG.type_name(), "MatrixUInt16");
    assert_eq!(ArrayText::TAG, array_of(ElementKind::Text));
    assert_eq!(matrix_of(ElementKind::Text), None);
    assert_eq!(matrix_of(ElementKind::Bool), Some(Tag::grid(ElementKind::Bool)));
}

#[test]
fn test_tag_display_and_convertibility() {
    let tag = Tag::flat(ElementKind::UInt8);
    assert_eq!(tag.to_string(), "flat uint8");
    assert!(ElementKind::Text.converts_to(ElementKind::Text));
    assert!(!ElementKind::Text.converts_to(ElementKind::Bool));
    assert!(ElementKind::Bool.converts_to(ElementKind::Float32));
}
