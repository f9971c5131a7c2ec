//! Core library for `sync_fileops`.
//!
//! Four cross-platform file primitives used by a synchronization engine:
//! `is_file`, `copy_file`, `rename_file` and `compare_files`. Each call is
//! blocking and self-contained, returns a structured `FileOpError` on
//! failure, and never leaves a handle open past its own return. Platform
//! differences (POSIX rename vs. a locking filesystem that needs retries)
//! live behind `platform::PlatformFileOps`.

pub mod codec;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use codec::{NativeCodec, NativePath, PathCodec};
pub use config::{Config, LogLevel, default_config_path, load_config};
pub use errors::{FileOpError, FileOpErrorKind, Result};
pub use fs_ops::{
    CopyOptions, Durability, FileOps, RetryPolicy, compare_files, copy_file, is_file, rename_file,
};
pub use platform::{DefaultOps, PlatformFileOps, PosixOps};
#[cfg(windows)]
pub use platform::LockingFsOps;
