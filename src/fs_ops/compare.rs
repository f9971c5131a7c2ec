//! Byte-for-byte file comparison.
//!
//! Sizes are compared first; files of different length are never opened.
//! Otherwise both files are read in lockstep, chunk by chunk. "Cannot tell"
//! (missing file, open or read failure) is an error, never `false`.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, trace};

use super::metadata::FileMetadata;
use crate::codec::PathCodec;
use crate::errors::{FileOpError, Result};
use crate::platform::{PlatformFileOps, classify};

pub(super) fn compare_with<O, C>(
    ops: &O,
    codec: &C,
    chunk_size: usize,
    f1: &str,
    f2: &str,
) -> Result<bool>
where
    O: PlatformFileOps + ?Sized,
    C: PathCodec + ?Sized,
{
    let a = codec.encode(f1)?;
    let b = codec.encode(f2)?;
    let meta_a = stat(ops, a.as_path())?;
    let meta_b = stat(ops, b.as_path())?;

    if meta_a.size != meta_b.size {
        trace!(f1, f2, size1 = meta_a.size, size2 = meta_b.size, "sizes differ");
        return Ok(false);
    }

    let mut file_a = open(a.as_path())?;
    let mut file_b = open(b.as_path())?;
    let chunk = chunk_size.max(1);
    let mut buf_a = vec![0u8; chunk];
    let mut buf_b = vec![0u8; chunk];

    loop {
        let n_a = fill(&mut file_a, &mut buf_a)
            .map_err(|e| FileOpError::io("read", a.as_path(), e))?;
        let n_b = fill(&mut file_b, &mut buf_b)
            .map_err(|e| FileOpError::io("read", b.as_path(), e))?;
        if n_a != n_b || buf_a[..n_a] != buf_b[..n_b] {
            debug!(f1, f2, "contents differ");
            return Ok(false);
        }
        if n_a == 0 {
            debug!(f1, f2, size = meta_a.size, "contents equal");
            return Ok(true);
        }
    }
}

fn stat<O: PlatformFileOps + ?Sized>(ops: &O, path: &Path) -> Result<FileMetadata> {
    let meta = FileMetadata::of_target(path).map_err(|e| classify(ops, "stat", path, e))?;
    if meta.is_dir() {
        return Err(FileOpError::IsDirectory(path.to_path_buf()));
    }
    Ok(meta)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| FileOpError::io("open", path, e))
}

/// Read until `buf` is full or end of input; returns the bytes read.
fn fill<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
