#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

use sync_fileops::compare_files;

#[test]
fn size_mismatch_answers_without_opening() {
    unsafe {
        if libc::geteuid() == 0 {
            eprintln!("skipping: root can open unreadable files");
            return;
        }
    }
    let td = tempdir().unwrap();
    let a = td.path().join("a");
    let b = td.path().join("b");
    fs::write(&a, b"short").unwrap();
    fs::write(&b, b"much longer").unwrap();
    fs::set_permissions(&b, fs::Permissions::from_mode(0o000)).unwrap();

    let res = compare_files(a.to_str().unwrap(), b.to_str().unwrap());
    fs::set_permissions(&b, fs::Permissions::from_mode(0o644)).unwrap();
    assert!(!res.unwrap());
}

#[test]
fn unreadable_file_of_equal_size_is_an_error() {
    unsafe {
        if libc::geteuid() == 0 {
            eprintln!("skipping: root can open unreadable files");
            return;
        }
    }
    let td = tempdir().unwrap();
    let a = td.path().join("a");
    let b = td.path().join("b");
    fs::write(&a, b"same").unwrap();
    fs::write(&b, b"same").unwrap();
    fs::set_permissions(&b, fs::Permissions::from_mode(0o000)).unwrap();

    let res = compare_files(a.to_str().unwrap(), b.to_str().unwrap());
    fs::set_permissions(&b, fs::Permissions::from_mode(0o644)).unwrap();
    let err = res.unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::EACCES));
}
