use std::fs;
use tempfile::tempdir;

use sync_fileops::{FileOpErrorKind, rename_file};

fn s(p: &std::path::Path) -> &str {
    p.to_str().expect("utf-8 temp path")
}

#[test]
fn rename_moves_content() {
    let td = tempdir().unwrap();
    let src = td.path().join("from.txt");
    let dst = td.path().join("to.txt");
    fs::write(&src, b"payload").unwrap();

    rename_file(s(&src), s(&dst)).unwrap();
    assert!(!src.exists());
    assert_eq!(fs::read(&dst).unwrap(), b"payload");
}

#[test]
fn rename_replaces_existing_destination() {
    let td = tempdir().unwrap();
    let src = td.path().join("from.txt");
    let dst = td.path().join("to.txt");
    fs::write(&src, b"new").unwrap();
    fs::write(&dst, b"old and longer").unwrap();

    rename_file(s(&src), s(&dst)).unwrap();
    assert!(!src.exists());
    assert_eq!(fs::read(&dst).unwrap(), b"new");
}

#[test]
fn missing_source_is_not_found_and_destination_untouched() {
    let td = tempdir().unwrap();
    let src = td.path().join("missing");
    let dst = td.path().join("to.txt");
    fs::write(&dst, b"keep").unwrap();

    let err = rename_file(s(&src), s(&dst)).unwrap_err();
    assert_eq!(err.kind(), FileOpErrorKind::NotFound);
    assert_eq!(fs::read(&dst).unwrap(), b"keep");
}

#[test]
fn missing_destination_directory_is_reported_against_destination() {
    let td = tempdir().unwrap();
    let src = td.path().join("from.txt");
    let dst = td.path().join("no_such_dir").join("to.txt");
    fs::write(&src, b"payload").unwrap();

    let err = rename_file(s(&src), s(&dst)).unwrap_err();
    assert_eq!(err.kind(), FileOpErrorKind::NotFound);
    assert_eq!(err.path(), Some(dst.as_path()));
    assert_eq!(fs::read(&src).unwrap(), b"payload", "source untouched");
}

#[test]
fn empty_path_is_invalid() {
    let td = tempdir().unwrap();
    let dst = td.path().join("to.txt");
    let err = rename_file("", s(&dst)).unwrap_err();
    assert_eq!(err.kind(), FileOpErrorKind::InvalidPath);
}
