#![cfg(target_os = "linux")]

//! A source that opens fine but fails on the first read: reading offset 0 of
//! this process's own memory file is always EIO.

use std::fs;
use std::path::Path;
use tempfile::tempdir;

use sync_fileops::{FileOpErrorKind, copy_file};

const FAILING_SOURCE: &str = "/proc/self/mem";

fn available() -> bool {
    if Path::new(FAILING_SOURCE).exists() {
        return true;
    }
    eprintln!("skipping: {FAILING_SOURCE} not available");
    false
}

#[test]
fn fresh_destination_is_removed_after_read_failure() {
    if !available() {
        return;
    }
    let td = tempdir().unwrap();
    let dst = td.path().join("out.bin");

    let err = copy_file(FAILING_SOURCE, dst.to_str().unwrap(), None).unwrap_err();
    assert_eq!(err.kind(), FileOpErrorKind::Io);
    assert!(err.to_string().starts_with("read "), "msg: {err}");
    assert!(!dst.exists(), "partial destination left behind");
}

#[test]
fn truncated_existing_destination_is_removed_after_read_failure() {
    if !available() {
        return;
    }
    let td = tempdir().unwrap();
    let dst = td.path().join("out.bin");
    fs::write(&dst, b"old content").unwrap();

    let err = copy_file(FAILING_SOURCE, dst.to_str().unwrap(), None).unwrap_err();
    assert_eq!(err.kind(), FileOpErrorKind::Io);
    assert!(!dst.exists(), "truncated destination left behind");
}

#[test]
fn symlinked_destination_target_is_removed_after_read_failure() {
    if !available() {
        return;
    }
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let target = base.join("target.bin");
    let link = base.join("link.bin");
    fs::write(&target, b"old content").unwrap();
    std::os::unix::fs::symlink(&target, &link).unwrap();

    assert!(copy_file(FAILING_SOURCE, link.to_str().unwrap(), None).is_err());
    assert!(!target.exists(), "truncated link target left behind");
}

#[test]
fn target_created_through_dangling_link_is_removed_after_read_failure() {
    if !available() {
        return;
    }
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let target = base.join("target.bin");
    let link = base.join("link.bin");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    assert!(copy_file(FAILING_SOURCE, link.to_str().unwrap(), None).is_err());
    assert!(!target.exists(), "created link target left behind");
}
