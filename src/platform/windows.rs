//! Windows variant: handle-based filesystem with mandatory locking.
//!
//! Notes:
//! - Moves use MoveFileExW with copy fallback across volumes, replace-existing
//!   and write-through, so a successful return is already durable.
//! - Access-denied, lock-violation and sharing-violation usually mean another
//!   process still holds the file open; they are reported as transient.
//! - Symlinks are not treated as files by the probe here.

use std::io;

use windows_sys::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_LOCK_VIOLATION, ERROR_SHARING_VIOLATION,
};
use windows_sys::Win32::Storage::FileSystem::{
    CopyFileW, MOVEFILE_COPY_ALLOWED, MOVEFILE_REPLACE_EXISTING, MOVEFILE_WRITE_THROUGH,
    MoveFileExW,
};

use super::PlatformFileOps;
use crate::codec::NativePath;

#[derive(Debug, Clone, Copy, Default)]
pub struct LockingFsOps;

impl PlatformFileOps for LockingFsOps {
    fn symlinks_are_files(&self) -> bool {
        false
    }

    fn move_file(&self, src: &NativePath, dst: &NativePath) -> io::Result<()> {
        let ok = unsafe {
            MoveFileExW(
                src.as_wide().as_ptr(),
                dst.as_wide().as_ptr(),
                MOVEFILE_COPY_ALLOWED | MOVEFILE_REPLACE_EXISTING | MOVEFILE_WRITE_THROUGH,
            )
        };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn native_copy(&self, src: &NativePath, dst: &NativePath) -> Option<io::Result<()>> {
        // bFailIfExists = FALSE: overwrite like the chunked copy does.
        let ok = unsafe { CopyFileW(src.as_wide().as_ptr(), dst.as_wide().as_ptr(), 0) };
        if ok == 0 {
            return Some(Err(io::Error::last_os_error()));
        }
        Some(Ok(()))
    }

    fn is_transient(&self, err: &io::Error) -> bool {
        matches!(
            err.raw_os_error().map(|c| c as u32),
            Some(ERROR_ACCESS_DENIED | ERROR_LOCK_VIOLATION | ERROR_SHARING_VIOLATION)
        )
    }
}
