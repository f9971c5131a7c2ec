//! Ephemeral per-call metadata.
//! Read once, used immediately, never cached between calls.

use std::fs;
use std::io;
use std::path::Path;

/// Type classification of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Regular,
    Symlink,
    Directory,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// Size in bytes.
    pub size: u64,
    /// Permission bits (`0o7777` mask on Unix; `0o444`/`0o666` elsewhere).
    pub mode: u32,
    pub entry_type: EntryType,
}

impl FileMetadata {
    /// Metadata of the entry itself; symlinks are not followed.
    pub fn of_entry(path: &Path) -> io::Result<Self> {
        fs::symlink_metadata(path).map(|m| Self::from_std(&m))
    }

    /// Metadata of the final target; symlinks are followed.
    pub fn of_target(path: &Path) -> io::Result<Self> {
        fs::metadata(path).map(|m| Self::from_std(&m))
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    fn from_std(meta: &fs::Metadata) -> Self {
        let ft = meta.file_type();
        let entry_type = if ft.is_symlink() {
            EntryType::Symlink
        } else if ft.is_dir() {
            EntryType::Directory
        } else if ft.is_file() {
            EntryType::Regular
        } else {
            EntryType::Other
        };
        Self {
            size: meta.len(),
            mode: permission_bits(meta),
            entry_type,
        }
    }
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() { 0o444 } else { 0o666 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn classifies_file_and_dir() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        fs::write(&f, b"12345").unwrap();

        let m = FileMetadata::of_entry(&f).unwrap();
        assert_eq!(m.entry_type, EntryType::Regular);
        assert_eq!(m.size, 5);

        let d = FileMetadata::of_entry(td.path()).unwrap();
        assert!(d.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn entry_vs_target_for_symlink() {
        let td = tempdir().unwrap();
        let f = td.path().join("f");
        let l = td.path().join("l");
        fs::write(&f, b"x").unwrap();
        std::os::unix::fs::symlink(&f, &l).unwrap();

        assert_eq!(FileMetadata::of_entry(&l).unwrap().entry_type, EntryType::Symlink);
        assert_eq!(FileMetadata::of_target(&l).unwrap().entry_type, EntryType::Regular);
    }
}
