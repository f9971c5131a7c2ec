use std::io;
use std::path::Path;

use sync_fileops::fs_ops::{describe_io_error, io_hint};
use sync_fileops::{FileOpError, FileOpErrorKind, copy_file};

#[test]
fn notfound_fallback_hint_includes_path() {
    let p = Path::new("/nonexistent/path/for/test");
    let msg = describe_io_error("open", p, &io::Error::from(io::ErrorKind::NotFound));
    assert!(msg.contains("open"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("path not found"));
}

#[test]
fn unclassified_kind_has_no_hint() {
    let e = io::Error::other("odd");
    assert_eq!(io_hint(&e), None);
    assert_eq!(describe_io_error("read", Path::new("x"), &e), "read 'x': odd");
}

#[cfg(unix)]
#[test]
fn enospc_hint_present() {
    let msg = describe_io_error("write", Path::new("/tmp"), &io::Error::from_raw_os_error(libc::ENOSPC));
    assert!(msg.contains("insufficient space"), "msg was: {msg}");
    assert!(msg.contains("os code"), "should include os code in message");
}

#[cfg(unix)]
#[test]
fn erofs_and_loop_hints() {
    let p = Path::new("/tmp");
    let msg = describe_io_error("write", p, &io::Error::from_raw_os_error(libc::EROFS));
    assert!(msg.contains("read-only filesystem"), "msg was: {msg}");
    let msg = describe_io_error("stat", p, &io::Error::from_raw_os_error(libc::ELOOP));
    assert!(msg.contains("symlink cycle"), "msg was: {msg}");
}

#[cfg(windows)]
#[test]
fn sharing_violation_hint_present() {
    let msg = describe_io_error("rename", Path::new("C:\\x"), &io::Error::from_raw_os_error(32));
    assert!(msg.contains("sharing violation"), "msg was: {msg}");
}

#[test]
fn io_error_display_carries_op_and_hint() {
    let err = FileOpError::Io {
        op: "write",
        path: "/data/out.bin".into(),
        source: io::Error::from(io::ErrorKind::WriteZero),
    };
    assert_eq!(err.kind(), FileOpErrorKind::Io);
    let msg = err.to_string();
    assert!(msg.starts_with("write '"), "msg was: {msg}");
    assert!(msg.contains("device may be full"), "msg was: {msg}");
}

#[test]
fn invalid_path_has_no_path() {
    let err = copy_file("", "dst", None).unwrap_err();
    assert_eq!(err.kind(), FileOpErrorKind::InvalidPath);
    assert!(err.path().is_none());
    assert!(err.raw_os_error().is_none());
}
