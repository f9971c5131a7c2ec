//! Platform capability for the primitives.
//!
//! The shared logic in `fs_ops` (preconditions, cleanup, retry policy) calls
//! through `PlatformFileOps` for the few things that really differ between a
//! POSIX filesystem and a locking, handle-based one: the move primitive, an
//! optional whole-file copy, which errors count as transient, and whether a
//! symlink counts as a file. The variant is chosen at build time via
//! `DefaultOps`; callers may inject another one through `FileOps::with_parts`.

use std::io;
use std::path::Path;
use std::time::Duration;

use crate::codec::NativePath;
use crate::errors::FileOpError;

mod posix;
#[cfg(windows)]
mod windows;

pub use posix::PosixOps;
#[cfg(windows)]
pub use windows::LockingFsOps;

/// Platform variant selected for this build.
#[cfg(windows)]
pub type DefaultOps = LockingFsOps;
/// Platform variant selected for this build.
#[cfg(not(windows))]
pub type DefaultOps = PosixOps;

pub trait PlatformFileOps {
    /// Whether a symbolic link itself is reported as a file by the probe.
    fn symlinks_are_files(&self) -> bool;

    /// One attempt at moving `src` over `dst` (replacing it).
    fn move_file(&self, src: &NativePath, dst: &NativePath) -> io::Result<()>;

    /// Whole-file copy offered by the OS, if any. `None` selects the chunked loop.
    fn native_copy(&self, _src: &NativePath, _dst: &NativePath) -> Option<io::Result<()>> {
        None
    }

    /// Whether `err` is lock/sharing contention worth retrying.
    fn is_transient(&self, err: &io::Error) -> bool;

    /// Block the calling thread between rename attempts.
    fn pause(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Map a platform error from a metadata or move call onto the error taxonomy.
pub(crate) fn classify<O: PlatformFileOps + ?Sized>(
    ops: &O,
    op: &'static str,
    path: &Path,
    err: io::Error,
) -> FileOpError {
    match err.kind() {
        io::ErrorKind::NotFound => FileOpError::NotFound(path.to_path_buf()),
        io::ErrorKind::IsADirectory => FileOpError::IsDirectory(path.to_path_buf()),
        _ if ops.is_transient(&err) => FileOpError::TransientLock {
            path: path.to_path_buf(),
            code: err.raw_os_error().unwrap_or_default(),
            attempts: 1,
        },
        _ => FileOpError::Unknown {
            op,
            path: path.to_path_buf(),
            source: err,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FileOpErrorKind;

    #[test]
    fn classify_not_found_and_other() {
        let p = Path::new("/nope");
        let e = classify(&PosixOps, "stat", p, io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(e.kind(), FileOpErrorKind::NotFound);

        let e = classify(&PosixOps, "stat", p, io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(e.kind(), FileOpErrorKind::Unknown);
    }

    #[cfg(unix)]
    #[test]
    fn classify_eisdir() {
        let e = classify(
            &PosixOps,
            "rename",
            Path::new("/d"),
            io::Error::from_raw_os_error(libc::EISDIR),
        );
        assert_eq!(e.kind(), FileOpErrorKind::IsDirectory);
    }
}
