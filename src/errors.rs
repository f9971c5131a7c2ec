//! Typed error definitions for the file primitives.
//! Every operation returns one of these; nothing is signalled through a global
//! error variable, so error state never leaks between calls or threads.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs_ops::helpers::hint_suffix;

/// Classification of a [`FileOpError`], for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOpErrorKind {
    InvalidPath,
    NotFound,
    IsDirectory,
    SameFile,
    Io,
    TransientLock,
    Unknown,
}

#[derive(Debug, Error)]
pub enum FileOpError {
    /// The path codec could not represent the text as a platform path.
    #[error("invalid path {text:?}: {reason}")]
    InvalidPath { text: String, reason: &'static str },

    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("is a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    /// Copy only: source and destination name the same file.
    #[error("source and destination are the same file: {}", .0.display())]
    SameFile(PathBuf),

    /// A read, write, open or flush failed partway through an operation.
    #[error("{op} '{}': {source}{}", .path.display(), hint_suffix(.source))]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Lock/sharing/access contention that outlasted the rename retry budget.
    #[error(
        "'{}' is held open by another process; gave up after {attempts} attempt(s) [os code: {code}]",
        .path.display()
    )]
    TransientLock {
        path: PathBuf,
        code: i32,
        attempts: u32,
    },

    /// Any platform error without a dedicated kind.
    #[error("{op} '{}': {source}{}", .path.display(), hint_suffix(.source))]
    Unknown {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileOpError {
    pub fn kind(&self) -> FileOpErrorKind {
        match self {
            FileOpError::InvalidPath { .. } => FileOpErrorKind::InvalidPath,
            FileOpError::NotFound(_) => FileOpErrorKind::NotFound,
            FileOpError::IsDirectory(_) => FileOpErrorKind::IsDirectory,
            FileOpError::SameFile(_) => FileOpErrorKind::SameFile,
            FileOpError::Io { .. } => FileOpErrorKind::Io,
            FileOpError::TransientLock { .. } => FileOpErrorKind::TransientLock,
            FileOpError::Unknown { .. } => FileOpErrorKind::Unknown,
        }
    }

    /// Underlying platform error code, when the failure came from the OS.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            FileOpError::Io { source, .. } | FileOpError::Unknown { source, .. } => {
                source.raw_os_error()
            }
            FileOpError::TransientLock { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Path the error refers to (None for text the codec rejected).
    pub fn path(&self) -> Option<&Path> {
        match self {
            FileOpError::InvalidPath { .. } => None,
            FileOpError::NotFound(p) | FileOpError::IsDirectory(p) | FileOpError::SameFile(p) => {
                Some(p)
            }
            FileOpError::Io { path, .. }
            | FileOpError::TransientLock { path, .. }
            | FileOpError::Unknown { path, .. } => Some(path),
        }
    }

    pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        FileOpError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FileOpError>;
