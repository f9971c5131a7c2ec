//! File primitives: probe, copy, rename, compare.
//!
//! `FileOps` bundles the platform capability, the path codec and the tuning
//! knobs; the free functions use the build's default platform and settings.
//! Every call is synchronous, holds its handles only for its own duration and
//! shares no mutable state with other calls.

mod compare;
mod copy;
pub mod helpers;
mod io_copy;
mod metadata;
mod probe;
mod rename;

pub use helpers::{describe_io_error, io_hint};
pub use io_copy::{CopyOptions, DEFAULT_CHUNK_SIZE, Durability};
pub use metadata::{EntryType, FileMetadata};
pub use rename::{DEFAULT_BACKOFF_UNIT, DEFAULT_RENAME_RETRIES, RetryPolicy};

use crate::codec::{NativeCodec, PathCodec};
use crate::config::Config;
use crate::errors::Result;
use crate::platform::{DefaultOps, PlatformFileOps};

#[derive(Debug, Clone, Default)]
pub struct FileOps<O = DefaultOps, C = NativeCodec> {
    ops: O,
    codec: C,
    copy: CopyOptions,
    retry: RetryPolicy,
}

impl FileOps {
    /// Default platform, default codec, default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default platform and codec with tuning taken from `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new()
            .with_copy_options(cfg.copy_options())
            .with_retry_policy(cfg.retry_policy())
    }
}

impl<O: PlatformFileOps, C: PathCodec> FileOps<O, C> {
    pub fn with_parts(ops: O, codec: C) -> Self {
        Self {
            ops,
            codec,
            copy: CopyOptions::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_copy_options(mut self, copy: CopyOptions) -> Self {
        self.copy = copy;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    pub fn copy_options(&self) -> &CopyOptions {
        &self.copy
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// True for a regular file (and, where the platform allows, a symlink,
    /// whose target is not checked). Missing or unreadable paths are `false`.
    pub fn is_file(&self, path: &str) -> bool {
        probe::is_file_with(&self.ops, &self.codec, path)
    }

    /// Copy `src` over `dst`. `mode` of `None`/`Some(0)` reuses the source's
    /// permission bits. Returns the number of bytes copied.
    pub fn copy_file(&self, src: &str, dst: &str, mode: Option<u32>) -> Result<u64> {
        copy::copy_with(&self.ops, &self.codec, &self.copy, src, dst, mode)
    }

    /// Move `src` to `dst`, replacing `dst`; retries transient lock errors.
    pub fn rename_file(&self, src: &str, dst: &str) -> Result<()> {
        rename::rename_with(&self.ops, &self.codec, &self.retry, src, dst)
    }

    /// `Ok(true)` when both files are byte-equal.
    pub fn compare_files(&self, f1: &str, f2: &str) -> Result<bool> {
        compare::compare_with(&self.ops, &self.codec, self.copy.chunk_size, f1, f2)
    }
}

/// [`FileOps::is_file`] with default settings.
pub fn is_file(path: &str) -> bool {
    FileOps::new().is_file(path)
}

/// [`FileOps::copy_file`] with default settings.
pub fn copy_file(src: &str, dst: &str, mode: Option<u32>) -> Result<u64> {
    FileOps::new().copy_file(src, dst, mode)
}

/// [`FileOps::rename_file`] with default settings.
pub fn rename_file(src: &str, dst: &str) -> Result<()> {
    FileOps::new().rename_file(src, dst)
}

/// [`FileOps::compare_files`] with default settings.
pub fn compare_files(f1: &str, f2: &str) -> Result<bool> {
    FileOps::new().compare_files(f1, f2)
}
