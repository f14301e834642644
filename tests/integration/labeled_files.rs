//! Series and frames on disk, with and without label sidecars.

use std::fs;

use tagged_array::binary;
use tagged_array::labeled::{FrameInt32, SeriesFloat64, SeriesText};
use tagged_array::{ElementKind, MismatchKind, RuntimeValue, Tag};
use tempfile::TempDir;

use crate::common::{float64_example, int32_grid};

#[test]
fn test_default_labels_write_no_sidecar() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.bin");
    let series = SeriesFloat64::am(float64_example()).unwrap();

    series.write(&path).unwrap();
    assert!(!dir.path().join("plain.bin.index").exists());

    let back = SeriesFloat64::read(&path).unwrap();
    assert!(back.index().is_none());
    assert!(back.values().value().bit_eq(&float64_example()));
}

#[test]
fn test_series_labels_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.bin");
    let series = SeriesFloat64::am(float64_example())
        .unwrap()
        .with_index(RuntimeValue::from_strs(["mon", "tue", "wed", "thu"]))
        .unwrap();

    series.write(&path).unwrap();
    let sidecar = dir.path().join("prices.bin.index");
    assert_eq!(
        binary::read_header_path(&sidecar).unwrap().tag(),
        Tag::flat(ElementKind::Text)
    );

    let back = SeriesFloat64::read(&path).unwrap();
    assert_eq!(
        back.index().unwrap().text().unwrap().iter().collect::<Vec<_>>(),
        vec!["mon", "tue", "wed", "thu"]
    );
}

#[test]
fn test_frame_labels_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grid.bin");
    let frame = FrameInt32::am(int32_grid())
        .unwrap()
        .with_index(RuntimeValue::from_vec(vec![10u32, 20]))
        .unwrap()
        .with_columns(RuntimeValue::from_strs(["a", "b", "c"]))
        .unwrap();

    frame.write(&path).unwrap();
    let back = FrameInt32::read(&path).unwrap();
    assert_eq!(back, frame);
    assert_eq!((back.nrows(), back.ncols()), (2, 3));
    assert_eq!(back.index().unwrap().as_slice::<u32>(), Some(&[10, 20][..]));
}

/// Only the axis with custom labels gets a sidecar.
#[test]
fn test_frame_writes_one_sidecar_per_custom_axis() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cols.bin");
    let frame = FrameInt32::am(int32_grid())
        .unwrap()
        .with_columns(RuntimeValue::from_strs(["x", "y", "z"]))
        .unwrap();

    frame.write(&path).unwrap();
    assert!(!dir.path().join("cols.bin.index").exists());
    assert!(dir.path().join("cols.bin.columns").exists());
}

/// Rewriting with positional labels must not resurrect the old ones.
#[test]
fn test_stale_sidecar_is_removed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reuse.bin");
    let labelled = SeriesText::am(RuntimeValue::from_strs(["p", "q"]))
        .unwrap()
        .with_index(RuntimeValue::from_vec(vec![5i64, 9]))
        .unwrap();
    labelled.write(&path).unwrap();

    let plain = SeriesText::am(RuntimeValue::from_strs(["p", "q"])).unwrap();
    plain.write(&path).unwrap();
    assert!(!dir.path().join("reuse.bin.index").exists());
    assert!(SeriesText::read(&path).unwrap().index().is_none());
}

/// A sidecar is re-checked on load: it must be flat and fit its axis.
#[test]
fn test_mismatched_sidecar_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.bin");
    SeriesFloat64::am(float64_example()).unwrap().write(&path).unwrap();
    let sidecar = dir.path().join("bad.bin.index");

    binary::write_path(
        Tag::flat(ElementKind::Int8),
        &RuntimeValue::from_vec(vec![3i8, 2, 1]),
        &sidecar,
    )
    .unwrap();
    let err = SeriesFloat64::read(&path).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::InvalidShape);

    binary::write_path(Tag::grid(ElementKind::Int32), &int32_grid(), &sidecar).unwrap();
    let err = SeriesFloat64::read(&path).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::DimensionMismatch);

    fs::write(&sidecar, [0xffu8]).unwrap();
    let err = SeriesFloat64::read(&path).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::CorruptHeader);
}

/// The values file is still held to its tag.
#[test]
fn test_series_read_checks_kind() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ints.bin");
    binary::write_path(Tag::flat(ElementKind::Int32), &RuntimeValue::from_vec(vec![1i32]), &path)
        .unwrap();
    let err = SeriesFloat64::read(&path).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::KindMismatch);
}
