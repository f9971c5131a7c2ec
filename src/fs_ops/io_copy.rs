//! Chunked content transfer and partial-destination cleanup.
//!
//! - Fixed-size chunks (4 KiB by default); a read that fails or a write that
//!   transfers fewer bytes than requested ends the copy with an error.
//! - `PartialDestination` removes a destination file once it has been created
//!   or truncated, unless the copy is committed. Removal is best-effort: if it
//!   fails, a truncated file remains and a warning is logged.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Chunk size used when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// What "done" means for the destination after the last write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Durability {
    /// Flush user-space buffers only; data may still sit in the OS page cache.
    Buffered,
    /// Force data and metadata to stable storage (`sync_all`) before close.
    #[default]
    Full,
}

impl Durability {
    /// Parse `full` / `buffered` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "sync" => Some(Durability::Full),
            "buffered" | "flush" => Some(Durability::Buffered),
            _ => None,
        }
    }

    pub(crate) fn finish(self, file: &mut File) -> io::Result<()> {
        match self {
            Durability::Buffered => file.flush(),
            Durability::Full => file.sync_all(),
        }
    }
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Durability::Buffered => "buffered",
            Durability::Full => "full",
        })
    }
}

/// Tuning for the chunked copy loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyOptions {
    pub chunk_size: usize,
    pub durability: Durability,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            durability: Durability::Full,
        }
    }
}

/// Which side of the transfer failed.
#[derive(Debug)]
pub(crate) enum TransferError {
    Read(io::Error),
    Write(io::Error),
}

/// Copy `reader` to `writer` in chunks of `chunk_size` until end of input.
/// Returns the number of bytes transferred.
pub(crate) fn copy_chunks<R, W>(
    reader: &mut R,
    writer: &mut W,
    chunk_size: usize,
) -> Result<u64, TransferError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total: u64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TransferError::Read(e)),
        };
        let written = loop {
            match writer.write(&buf[..n]) {
                Ok(w) => break w,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransferError::Write(e)),
            }
        };
        if written != n {
            return Err(TransferError::Write(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {written} of {n} bytes"),
            )));
        }
        total += n as u64;
    }
}

/// Scope guard deleting a partially written destination unless `commit` is called.
///
/// Declare it before the destination `File` so the handle is closed first,
/// and arm it only once the destination's previous content is gone.
#[derive(Debug, Default)]
pub(crate) struct PartialDestination {
    path: Option<PathBuf>,
}

impl PartialDestination {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Remove `path` on drop.
    pub(crate) fn arm(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub(crate) fn commit(mut self) {
        self.path = None;
    }
}

impl Drop for PartialDestination {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "removed partial destination"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "could not remove partial destination; a truncated file remains"
            ),
        }
    }
}
