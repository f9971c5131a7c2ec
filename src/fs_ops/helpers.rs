//! I/O error description helpers.
//!
//! Turns an io::Error into a short actionable hint keyed on the raw OS code,
//! falling back to the ErrorKind. Used by the error Display impls and by
//! callers that want to log a failure with context.
//!
//! Usage:
//!   warn!("{}", describe_io_error("rename", src, &e));

use std::io;
use std::path::Path;

#[cfg(unix)]
use libc;

/// Platform-aware hint for a raw OS code or error kind.
pub fn io_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => {
                    Some("permission denied; check ownership and write permissions")
                }
                libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
                libc::EBUSY => Some("resource busy; another process is using the file"),
                libc::ENOENT => Some("path not found; verify it exists"),
                libc::EISDIR => Some("is a directory; a regular file was expected"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem; cannot write here"),
                libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
                libc::ENAMETOOLONG => Some("filename or path too long"),
                libc::EMFILE => Some("process file descriptor limit reached"),
                libc::ENFILE => Some("system-wide file table overflow"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => Some("access denied; check permissions or whether the file is open"),
                17 => Some("not same device; cross-volume move"),
                32 => Some("sharing violation; file is in use"),
                33 => Some("lock violation; part of the file is locked"),
                2 | 3 => Some("path not found; verify it exists"),
                112 => Some("insufficient disk space"),
                19 => Some("write protected / read-only media"),
                206 => Some("filename or path too long"),
                4 => Some("too many open files"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        #[cfg(not(any(unix, windows)))]
        let _ = code;
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        io::ErrorKind::WriteZero => Some("short write; device may be full"),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Some("busy/timed out; retry later"),
        _ => None,
    }
}

/// Suffix appended to error messages: hint plus OS code, or empty.
pub(crate) fn hint_suffix(e: &io::Error) -> String {
    let mut out = String::new();
    if let Some(hint) = io_hint(e) {
        out.push_str(" (");
        out.push_str(hint);
        out.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        out.push_str(&format!(" [os code: {code}]"));
    }
    out
}

/// Human-friendly one-line description of a failed operation on `path`.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    format!("{} '{}': {}{}", op, path.display(), e, hint_suffix(e))
}
