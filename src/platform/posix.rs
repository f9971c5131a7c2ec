//! POSIX variant: a single atomic `rename(2)`, no transient errors.

use std::fs;
use std::io;
#[cfg(unix)]
use std::path::Path;
#[cfg(unix)]
use tracing::debug;

use super::PlatformFileOps;
use crate::codec::NativePath;

#[derive(Debug, Clone, Copy, Default)]
pub struct PosixOps;

impl PlatformFileOps for PosixOps {
    fn symlinks_are_files(&self) -> bool {
        cfg!(unix)
    }

    fn move_file(&self, src: &NativePath, dst: &NativePath) -> io::Result<()> {
        fs::rename(src.as_path(), dst.as_path())?;

        // Persist the directory entry; a failed dir fsync does not undo the rename.
        #[cfg(unix)]
        {
            if let Err(e) = sync_parent(dst.as_path()) {
                debug!(dst = %dst.as_path().display(), error = %e, "directory fsync after rename failed");
            }
        }
        Ok(())
    }

    fn is_transient(&self, _err: &io::Error) -> bool {
        false
    }
}

#[cfg(unix)]
fn sync_parent(path: &Path) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::File::open(parent)?.sync_all()
}
