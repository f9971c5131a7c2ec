//! "Is this a file?" probe.
//! Metadata only; any failure to read metadata simply means "not a file".

use tracing::trace;

use super::metadata::{EntryType, FileMetadata};
use crate::codec::PathCodec;
use crate::platform::PlatformFileOps;

pub(super) fn is_file_with<O, C>(ops: &O, codec: &C, path: &str) -> bool
where
    O: PlatformFileOps + ?Sized,
    C: PathCodec + ?Sized,
{
    let Ok(native) = codec.encode(path) else {
        return false;
    };
    match FileMetadata::of_entry(native.as_path()) {
        Ok(meta) => match meta.entry_type {
            EntryType::Regular => true,
            // The link target is not resolved.
            EntryType::Symlink => ops.symlinks_are_files(),
            EntryType::Directory | EntryType::Other => false,
        },
        Err(e) => {
            trace!(path, error = %e, "metadata unavailable; not a file");
            false
        }
    }
}
