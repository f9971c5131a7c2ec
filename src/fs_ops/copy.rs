//! File copy with precondition checks and cleanup on failure.
//!
//! Preconditions are checked before anything is opened: identical paths,
//! unreadable source, directory source, directory destination. The copy then
//! truncates the destination in place (it is not atomic with respect to
//! concurrent readers of `dst`), writes it in chunks and syncs it before close.
//! Once a regular destination has been created or truncated, any failure
//! removes it again. Failures before that point leave `dst` untouched, and
//! non-regular destinations (devices, pipes) are never removed.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::io_copy::{CopyOptions, PartialDestination, TransferError, copy_chunks};
use super::metadata::{EntryType, FileMetadata};
use crate::codec::{NativePath, PathCodec};
use crate::errors::{FileOpError, Result};
use crate::platform::{PlatformFileOps, classify};

pub(super) fn copy_with<O, C>(
    ops: &O,
    codec: &C,
    opts: &CopyOptions,
    src: &str,
    dst: &str,
    mode: Option<u32>,
) -> Result<u64>
where
    O: PlatformFileOps + ?Sized,
    C: PathCodec + ?Sized,
{
    if src == dst {
        return Err(FileOpError::SameFile(PathBuf::from(src)));
    }
    let from = codec.encode(src)?;
    let to = codec.encode(dst)?;

    let src_meta = source_metadata(from.as_path())?;
    if src_meta.is_dir() {
        return Err(FileOpError::IsDirectory(from.as_path().to_path_buf()));
    }
    let dst_existed = check_destination(from.as_path(), to.as_path())?;

    if let Some(res) = ops.native_copy(&from, &to) {
        return finish_native(ops, &from, &to, dst_existed, src_meta.size, res);
    }

    let mode = resolve_mode(mode, &src_meta);
    let mut reader = File::open(from.as_path())
        .map_err(|e| FileOpError::io("open source", from.as_path(), e))?;

    // Dropped after `writer`, so the handle is closed before any removal.
    let mut guard = PartialDestination::new();
    let (mut writer, created) = open_destination(to.as_path(), mode)
        .map_err(|e| FileOpError::io("open destination", to.as_path(), e))?;
    if created || writer.metadata().is_ok_and(|m| m.is_file()) {
        guard.arm(data_path(to.as_path()));
    }
    if created {
        apply_mode(&writer, mode)
            .map_err(|e| FileOpError::io("set permissions", to.as_path(), e))?;
    }

    let bytes = copy_chunks(&mut reader, &mut writer, opts.chunk_size).map_err(|e| match e {
        TransferError::Read(e) => FileOpError::io("read", from.as_path(), e),
        TransferError::Write(e) => FileOpError::io("write", to.as_path(), e),
    })?;
    opts.durability
        .finish(&mut writer)
        .map_err(|e| FileOpError::io("sync destination", to.as_path(), e))?;

    drop(writer);
    drop(reader);
    guard.commit();
    debug!(
        src = %from.as_path().display(),
        dst = %to.as_path().display(),
        bytes,
        mode = format!("{:o}", mode),
        "copied file"
    );
    Ok(bytes)
}

/// Entry metadata of the source; a symlinked source is judged by its target.
fn source_metadata(src: &Path) -> Result<FileMetadata> {
    let meta = FileMetadata::of_entry(src).map_err(|e| stat_error(src, e))?;
    if meta.entry_type != EntryType::Symlink {
        return Ok(meta);
    }
    FileMetadata::of_target(src).map_err(|e| stat_error(src, e))
}

fn stat_error(path: &Path, e: io::Error) -> FileOpError {
    if e.kind() == io::ErrorKind::NotFound {
        FileOpError::NotFound(path.to_path_buf())
    } else {
        FileOpError::io("stat", path, e)
    }
}

/// Refuse a directory destination, or one that is the source under another
/// name. Returns whether `dst` already existed.
fn check_destination(src: &Path, dst: &Path) -> Result<bool> {
    let target = match fs::metadata(dst) {
        Ok(m) => m,
        Err(_) => return Ok(fs::symlink_metadata(dst).is_ok()),
    };
    if target.is_dir() {
        return Err(FileOpError::IsDirectory(dst.to_path_buf()));
    }
    if let Ok(source) = fs::metadata(src) {
        if same_file(&source, &target) {
            return Err(FileOpError::SameFile(dst.to_path_buf()));
        }
    }
    Ok(true)
}

#[cfg(unix)]
fn same_file(a: &fs::Metadata, b: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
fn same_file(_a: &fs::Metadata, _b: &fs::Metadata) -> bool {
    false
}

/// Zero or absent means "same permission bits as the source".
fn resolve_mode(requested: Option<u32>, src_meta: &FileMetadata) -> u32 {
    match requested {
        Some(m) if m != 0 => m & 0o7777,
        _ => src_meta.mode,
    }
}

/// Open for writing, creating or truncating. Reports whether the file was
/// created by this call (including through a dangling symlink).
fn open_destination(path: &Path, mode: u32) -> io::Result<(File, bool)> {
    let options = |create_new: bool| {
        let mut o = OpenOptions::new();
        o.write(true);
        if create_new {
            o.create_new(true);
        } else {
            o.create(true).truncate(true);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            o.mode(mode);
        }
        o
    };
    #[cfg(not(unix))]
    let _ = mode;

    match options(true).open(path) {
        Ok(f) => Ok((f, true)),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            // create_new refuses any symlink; a dangling one has no target yet.
            let target_existed = fs::metadata(path).is_ok();
            trace!(path = %path.display(), target_existed, "destination exists; truncating");
            Ok((options(false).open(path)?, !target_existed))
        }
        Err(e) => Err(e),
    }
}

/// The file that holds the written bytes: the link target when `dst` is a symlink.
fn data_path(dst: &Path) -> PathBuf {
    match fs::symlink_metadata(dst) {
        Ok(m) if m.file_type().is_symlink() => {
            fs::canonicalize(dst).unwrap_or_else(|_| dst.to_path_buf())
        }
        _ => dst.to_path_buf(),
    }
}

/// The create mode is filtered by the umask; set the exact bits explicitly.
#[cfg(unix)]
fn apply_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_mode(_file: &File, _mode: u32) -> io::Result<()> {
    Ok(())
}

fn finish_native<O: PlatformFileOps + ?Sized>(
    ops: &O,
    from: &NativePath,
    to: &NativePath,
    dst_existed: bool,
    size: u64,
    res: io::Result<()>,
) -> Result<u64> {
    let mut guard = PartialDestination::new();
    match res {
        Ok(()) => {
            debug!(
                src = %from.as_path().display(),
                dst = %to.as_path().display(),
                bytes = size,
                "copied file (native)"
            );
            Ok(size)
        }
        Err(e) => {
            if !dst_existed {
                guard.arm(to.as_path().to_path_buf());
            }
            Err(classify(ops, "copy", from.as_path(), e))
        }
    }
}
