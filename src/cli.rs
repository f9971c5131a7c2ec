//! CLI definition and parsing.
//!
//! Notes:
//! - Paths are taken as UTF-8 text, the same portable form the library accepts.
//! - --debug is a shorthand for --log-level debug.
//! - Flags override values from the XML config.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use sync_fileops::{Config, LogLevel};

/// Developer front-end for the sync_fileops primitives.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Probe, copy, rename and compare files with sync_fileops"
)]
pub struct Args {
    /// Explicit config file (otherwise $SYNC_FILEOPS_CONFIG or the default location).
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, global = true, value_parser = parse_level)]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the config file location that would be used, then exit.
    #[arg(long)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Exit 0 if PATH is a file (a symlink counts on Unix), 1 otherwise.
    IsFile {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: String,
    },
    /// Copy SRC over DST.
    Copy {
        #[arg(value_hint = ValueHint::FilePath)]
        src: String,
        #[arg(value_hint = ValueHint::FilePath)]
        dst: String,
        /// Octal permission bits for a newly created DST (default: same as SRC).
        #[arg(long, value_parser = parse_mode)]
        mode: Option<u32>,
    },
    /// Move SRC to DST, replacing DST.
    Rename {
        #[arg(value_hint = ValueHint::FilePath)]
        src: String,
        #[arg(value_hint = ValueHint::FilePath)]
        dst: String,
    },
    /// Exit 0 if A and B are byte-equal, 1 if they differ.
    Compare {
        #[arg(value_hint = ValueHint::FilePath)]
        a: String,
        #[arg(value_hint = ValueHint::FilePath)]
        b: String,
    },
}

fn parse_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.trim().trim_start_matches("0o");
    let mode = u32::from_str_radix(digits, 8).map_err(|_| format!("not an octal mode: '{s}'"))?;
    if mode > 0o7777 {
        return Err(format!("mode out of range: '{s}'"));
    }
    Ok(mode)
}

impl Args {
    /// Precedence: --debug > --log-level > config.
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
