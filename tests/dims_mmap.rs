//! End-to-end checks against the memory-mapped backend.
#![cfg(feature = "mmap")]

use dimcheck::{constraints, ops, storage::MmapStorage, DimCheckError, DimChecker, MmapBackend, Tensor};
use tempfile::tempdir;

type Mapped<T> = Tensor<T, MmapStorage<T>>;

#[test]
fn test_sum_keeps_unit_axis() {
    let checker = DimChecker::with_backend(MmapBackend::<f32>::new())
        .with_max_size(30)
        .with_depth(3);
    let sum_last = |x: &[Mapped<f32>]| ops::sum_axis(&x[0], 2, true).unwrap();

    checker.test_dims(sum_last, "bcl -> bcn", constraints![n = 1]).unwrap();
    let err = checker.test_dims(sum_last, "bcl -> bcn", constraints![n = 0]).unwrap_err();
    assert!(matches!(err, DimCheckError::ShapeMismatch { .. }));
}

#[test]
fn test_identity_with_f64() {
    DimChecker::with_backend(MmapBackend::<f64>::new())
        .with_max_size(30)
        .with_depth(3)
        .test_dims(|x| x[0].clone(), "bcl, bcl -> bcl", &[])
        .unwrap();
}

#[test]
fn test_file_backed_inputs_are_cleaned_up() {
    let dir = tempdir().unwrap();
    let checker = DimChecker::with_backend(MmapBackend::<f32>::in_dir(dir.path()))
        .with_max_size(30)
        .with_depth(4);

    let mut files_seen = 0;
    checker
        .test_dims(
            |x: &[Mapped<f32>]| {
                files_seen = x.iter().filter(|t| t.storage().path().is_some()).count();
                (x[0].clone(), ops::narrow(&x[1], 1, 0, 1).unwrap())
            },
            "ab, ab -> ab, an",
            constraints![n = 1],
        )
        .unwrap();

    assert_eq!(files_seen, 2);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_display_names_backend() {
    let checker = DimChecker::with_backend(MmapBackend::<f32>::new()).with_depth(2);
    assert_eq!(
        checker.to_string(),
        "DimChecker(backend=mmap, fill=random, max_size=100, depth=2, strict=false)"
    );
}
