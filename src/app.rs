//! Application orchestrator.
//! Loads/merges config, initializes logging and runs one primitive.
//!
//! Exit codes: 0 success / true / equal, 1 false / different, 2 operation error.

use anyhow::Result;
use std::process::ExitCode;
use tracing::debug;

use sync_fileops::config::CONFIG_ENV_VAR;
use sync_fileops::output as out;
use sync_fileops::{FileOpError, FileOps, default_config_path, load_config};

use crate::cli::{Args, Command};
use crate::logging::init_tracing;

const EXIT_NEGATIVE: u8 = 1;
const EXIT_OP_ERROR: u8 = 2;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location(&args);
        return Ok(ExitCode::SUCCESS);
    }

    let mut cfg = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut cfg);
    cfg.validate()?;
    let _log_guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)?;
    debug!(?cfg, "effective configuration");

    let Some(command) = args.command else {
        out::print_error("no command given; run with --help for usage");
        return Ok(ExitCode::from(EXIT_OP_ERROR));
    };

    let ops = FileOps::from_config(&cfg);
    match execute(&ops, command) {
        Ok(code) => Ok(code),
        Err(e) => {
            debug!(kind = ?e.kind(), os_code = ?e.raw_os_error(), "operation failed");
            out::print_error(&e.to_string());
            Ok(ExitCode::from(EXIT_OP_ERROR))
        }
    }
}

fn execute(ops: &FileOps, command: Command) -> Result<ExitCode, FileOpError> {
    match command {
        Command::IsFile { path } => Ok(verdict(ops.is_file(&path), "true", "false")),
        Command::Copy { src, dst, mode } => {
            let bytes = ops.copy_file(&src, &dst, mode)?;
            out::print_success(&format!("Copied {src} -> {dst} ({bytes} bytes)"));
            Ok(ExitCode::SUCCESS)
        }
        Command::Rename { src, dst } => {
            ops.rename_file(&src, &dst)?;
            out::print_success(&format!("Renamed {src} -> {dst}"));
            Ok(ExitCode::SUCCESS)
        }
        Command::Compare { a, b } => Ok(verdict(ops.compare_files(&a, &b)?, "equal", "different")),
    }
}

fn verdict(yes: bool, yes_word: &str, no_word: &str) -> ExitCode {
    if yes {
        out::print_user(yes_word);
        ExitCode::SUCCESS
    } else {
        out::print_user(no_word);
        ExitCode::from(EXIT_NEGATIVE)
    }
}

fn print_config_location(args: &Args) {
    if let Some(p) = &args.config {
        out::print_info(&format!("Using --config (explicit):\n  {}", p.display()));
        return;
    }
    if let Some(v) = std::env::var_os(CONFIG_ENV_VAR) {
        out::print_info(&format!(
            "Using {CONFIG_ENV_VAR} (explicit):\n  {}",
            v.to_string_lossy()
        ));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default config path:\n  {}", p.display()));
            if !p.exists() {
                out::print_info("No config file exists there yet; built-in defaults apply.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}
