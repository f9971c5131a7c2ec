//! Rename/move with bounded retry on transient lock contention.
//!
//! The platform decides which errors are transient (on POSIX none are, so a
//! rename is a single `rename(2)`). Transient failures are retried with a
//! linear backoff: retry `n` waits `n * backoff_unit`. Any other failure ends
//! the call immediately. There is no cancellation; the caller's thread is
//! blocked for the cumulative backoff.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::codec::{NativePath, PathCodec};
use crate::errors::{FileOpError, Result};
use crate::platform::{PlatformFileOps, classify};

pub const DEFAULT_RENAME_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (so at most `max_retries + 1` attempts).
    pub max_retries: u32,
    /// Delay added per retry.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_RENAME_RETRIES,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_unit: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.backoff_unit.saturating_mul(retry)
    }
}

/// Per-call bookkeeping, dropped on return.
#[derive(Debug, Default)]
struct RetryState {
    attempts: u32,
    waited: Duration,
}

pub(super) fn rename_with<O, C>(
    ops: &O,
    codec: &C,
    policy: &RetryPolicy,
    src: &str,
    dst: &str,
) -> Result<()>
where
    O: PlatformFileOps + ?Sized,
    C: PathCodec + ?Sized,
{
    let from = codec.encode(src)?;
    let to = codec.encode(dst)?;
    let mut state = RetryState::default();

    loop {
        state.attempts += 1;
        let err = match ops.move_file(&from, &to) {
            Ok(()) => {
                debug!(
                    src,
                    dst,
                    attempts = state.attempts,
                    waited_ms = state.waited.as_millis() as u64,
                    "renamed file"
                );
                return Ok(());
            }
            Err(e) => e,
        };

        if !ops.is_transient(&err) {
            return Err(classify(ops, "rename", blamed_path(&err, &from, &to), err));
        }

        let code = err.raw_os_error().unwrap_or_default();
        let retry = state.attempts;
        if retry > policy.max_retries {
            warn!(
                src,
                dst,
                attempts = state.attempts,
                waited_ms = state.waited.as_millis() as u64,
                os_code = code,
                "rename still blocked; giving up"
            );
            return Err(FileOpError::TransientLock {
                path: from.as_path().to_path_buf(),
                code,
                attempts: state.attempts,
            });
        }

        let delay = policy.delay_for(retry);
        warn!(
            src,
            dst,
            attempt = state.attempts,
            delay_ms = delay.as_millis() as u64,
            os_code = code,
            "rename blocked by another handle; retrying"
        );
        ops.pause(delay);
        state.waited += delay;
    }
}

/// A missing path while the source is still present means the destination's
/// directory is missing.
fn blamed_path<'a>(err: &io::Error, from: &'a NativePath, to: &'a NativePath) -> &'a Path {
    if err.kind() == io::ErrorKind::NotFound && fs::symlink_metadata(from.as_path()).is_ok() {
        to.as_path()
    } else {
        from.as_path()
    }
}
