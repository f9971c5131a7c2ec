//! Core configuration types.
//! - Config holds runtime settings with the same defaults as the built-in constants.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::fs_ops::{
    CopyOptions, DEFAULT_BACKOFF_UNIT, DEFAULT_CHUNK_SIZE, DEFAULT_RENAME_RETRIES, Durability,
    RetryPolicy,
};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and informational output (default)
    #[default]
    Normal,
    /// Per-operation detail
    Info,
    /// Everything, including fast-path decisions
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the primitives and the CLI around them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Bytes per read/write in the copy loop and per compare step
    pub chunk_size: usize,
    /// Flush behaviour at the end of a copy
    pub durability: Durability,
    /// Rename retries on transient lock errors
    pub rename_retries: u32,
    /// Backoff added per rename retry
    pub rename_backoff: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
            log_file: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            durability: Durability::Full,
            rename_retries: DEFAULT_RENAME_RETRIES,
            rename_backoff: DEFAULT_BACKOFF_UNIT,
        }
    }
}

impl Config {
    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            chunk_size: self.chunk_size,
            durability: self.durability,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.rename_retries,
            backoff_unit: self.rename_backoff,
        }
    }
}
