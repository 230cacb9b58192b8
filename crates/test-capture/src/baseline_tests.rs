// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use rstest::rstest;

#[rstest]
#[case("record", CompareMode::Record)]
#[case("compare", CompareMode::Compare)]
#[case("verify", CompareMode::Verify)]
#[case(" Record ", CompareMode::Record)]
#[case("VERIFY", CompareMode::Verify)]
fn mode_parses(#[case] input: &str, #[case] expected: CompareMode) {
    assert_eq!(input.parse::<CompareMode>().unwrap(), expected);
}

#[test]
fn unknown_mode_is_rejected() {
    let err = "overwrite".parse::<CompareMode>().unwrap_err();
    assert!(err.contains("'overwrite'"));
    assert!(err.contains("record, compare or verify"));
}

#[test]
fn mode_defaults_to_verify() {
    assert_eq!(CompareMode::default(), CompareMode::Verify);
}

#[rstest]
#[case(CompareMode::Record)]
#[case(CompareMode::Compare)]
#[case(CompareMode::Verify)]
fn mode_display_parses_back(#[case] mode: CompareMode) {
    assert_eq!(mode.to_string().parse::<CompareMode>().unwrap(), mode);
}

#[test]
fn baseline_is_named_after_capture() {
    let dir = BaselineDir::new("tests/screenshots");
    let baseline = dir
        .baseline_for(Path::new("build/screenshots/home.png"))
        .unwrap();
    assert_eq!(baseline, PathBuf::from("tests/screenshots/home.png"));
}

#[test]
fn baseline_requires_file_name() {
    let dir = BaselineDir::new("tests/screenshots");
    let err = dir.baseline_for(Path::new("/")).unwrap_err();
    assert!(matches!(err, StoreError::NoFileName(_)));
}

#[test]
fn ensure_creates_nested_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = BaselineDir::new(tmp.path().join("a/b/c"));
    dir.ensure().unwrap();
    assert!(dir.root().is_dir());
}

#[rstest]
#[case("out/home.png", "_diff", "png", "out/home_diff.png")]
#[case("out/home.png", "_actual", "png", "out/home_actual.png")]
#[case("out/log.txt", "", "diff", "out/log.diff")]
fn sibling_appends_suffix(
    #[case] path: &str,
    #[case] suffix: &str,
    #[case] extension: &str,
    #[case] expected: &str,
) {
    assert_eq!(
        sibling(Path::new(path), suffix, extension),
        PathBuf::from(expected)
    );
}

#[test]
fn io_error_names_path() {
    let err = StoreError::io(
        Path::new("/missing/home.png"),
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    );
    assert_eq!(err.to_string(), "I/O error at /missing/home.png: gone");
}
