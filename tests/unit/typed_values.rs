//! The `Typed<M>` wrapper: construction through the engine, typed access,
//! and persistence through its own tag.

use tagged_array::{
    ArrayBool, ArrayFloat64, ArrayInt16, ArrayText, MatrixFloat32, MatrixInt32, MismatchKind,
    RuntimeValue, Scalar, Typed,
};
use tempfile::TempDir;

use crate::common::int32_grid;

#[test]
fn test_am_then_typed_access() {
    let grid = Typed::<MatrixInt32>::am(int32_grid()).unwrap();
    assert_eq!((grid.nrows(), grid.ncols()), (2, 3));
    assert_eq!(grid.row(0), Some(&[1, -2, 3][..]));
    assert_eq!(grid.get(1, 2), Some(-6));
}

#[test]
fn test_am_rejects_flat_for_matrix() {
    let flat = RuntimeValue::from_vec(vec![1i32, 2]);
    let err = Typed::<MatrixInt32>::am(flat).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::DimensionMismatch);
}

#[test]
fn test_try_from_is_am() {
    let value = RuntimeValue::from_vec(vec![true, false]);
    let flags: Typed<ArrayBool> = value.try_into().unwrap();
    assert_eq!(flags.as_slice(), &[true, false]);
}

#[test]
fn test_be_converts_grid() {
    let grid = Typed::<MatrixFloat32>::be(int32_grid()).unwrap();
    assert_eq!(grid.as_slice(), &[1.0, -2.0, 3.0, -4.0, 5.0, -6.0]);
    assert_eq!(grid.shape(), &[2, 3]);
}

#[test]
#[should_panic(expected = "coercion never changes dimensionality")]
fn test_be_panics_on_flat_for_matrix() {
    let _ = Typed::<MatrixFloat32>::be(RuntimeValue::from_vec(vec![1i32]));
}

#[test]
fn test_try_be_reports_instead_of_panicking() {
    let err = Typed::<MatrixFloat32>::try_be(RuntimeValue::from_vec(vec![1i32])).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::DimensionMismatch);
}

#[test]
fn test_filled_narrows_the_fill() {
    let shorts = Typed::<ArrayInt16>::filled(Scalar::Int(70_000), &[3]).unwrap();
    assert_eq!(shorts.as_slice(), &[4464; 3]);
}

#[test]
fn test_from_shape_vec_checks_length() {
    let err = Typed::<MatrixInt32>::from_shape_vec(vec![2, 2], vec![1, 2, 3]).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::InvalidShape);
}

#[test]
fn test_text_cells() {
    let words = Typed::<ArrayText>::am(RuntimeValue::from_strs(["héllo", "", "ok"])).unwrap();
    let cells = words.cells();
    assert_eq!(cells.width(), "héllo".len());
    assert_eq!(cells.iter().collect::<Vec<_>>(), vec!["héllo", "", "ok"]);
}

#[test]
fn test_write_and_read_through_the_tag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.bin");

    let weights = Typed::<ArrayFloat64>::am(RuntimeValue::from_vec(vec![0.25, -1.0])).unwrap();
    weights.write(&path).unwrap();

    let back = Typed::<ArrayFloat64>::read(&path).unwrap();
    assert_eq!(back, weights);

    let err = Typed::<ArrayInt16>::read(&path).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::KindMismatch);
}

#[test]
fn test_read_missing_file_is_io_failure() {
    let dir = TempDir::new().unwrap();
    let err = Typed::<ArrayFloat64>::read(dir.path().join("absent.bin")).unwrap_err();
    assert_eq!(err.kind(), MismatchKind::IoFailure);
}
