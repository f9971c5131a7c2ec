//! Tracing initialization.
//!
//! Behavior:
//! - Level comes from LogLevel (no RUST_LOG override).
//! - Console events go to stderr so stdout stays free for command results.
//! - Compact or JSON formatting, selected by the `json` flag.
//! - With `log_file`, a non-blocking file layer is added unless an ancestor of
//!   the path is a symlink; refusal is reported and logging continues on stderr.

use anyhow::{Result, anyhow};
use chrono::Local;
use std::fmt as stdfmt;
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use sync_fileops::config::path_has_symlink_ancestor;
use sync_fileops::output as out;
use sync_fileops::LogLevel;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;

impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

fn env_filter(lvl: LogLevel) -> EnvFilter {
    EnvFilter::new(match lvl {
        LogLevel::Quiet => "error",
        LogLevel::Normal => "info",
        LogLevel::Info => "debug",
        LogLevel::Debug => "trace",
    })
}

fn fmt_layer<W>(writer: W, json: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_level(true)
        .with_target(true)
        .with_writer(writer);
    if json {
        base.json().boxed()
    } else {
        base.compact().boxed()
    }
}

/// Open `path` for appending behind a non-blocking writer, or explain why not.
fn file_layer(path: &Path, json: bool) -> std::result::Result<(BoxedLayer, WorkerGuard), String> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => return Err("an ancestor of the path is a symlink".into()),
        Err(e) => return Err(format!("could not check the path for symlinks: {e}")),
    }
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("could not open it: {e}"))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    Ok((fmt_layer(writer, json), guard))
}

/// Install the global subscriber. The returned guard (if any) must be held
/// until exit so buffered file logs are flushed.
pub fn init_tracing(lvl: LogLevel, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(lvl);
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(std::io::stderr, json)];
    let mut guard = None;

    if let Some(path) = log_file {
        match file_layer(path, json) {
            Ok((layer, g)) => {
                layers.push(layer);
                guard = Some(g);
            }
            Err(reason) => out::print_warn(&format!(
                "file logging to '{}' not enabled: {}; logs continue on stderr",
                path.display(),
                reason
            )),
        }
    }

    Registry::default()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(guard)
}
