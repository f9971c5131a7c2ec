//! Config validation: numeric bounds for the tuning knobs.

use anyhow::{Result, bail};

use super::types::Config;
use super::{MAX_CHUNK_SIZE, MAX_RENAME_BACKOFF, MAX_RENAME_RETRIES};

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            bail!(
                "chunk_size must be between 1 and {} bytes, got {}",
                MAX_CHUNK_SIZE,
                self.chunk_size
            );
        }
        if self.rename_retries > MAX_RENAME_RETRIES {
            bail!(
                "rename_retries must be at most {}, got {}",
                MAX_RENAME_RETRIES,
                self.rename_retries
            );
        }
        if self.rename_backoff > MAX_RENAME_BACKOFF {
            bail!(
                "rename_backoff must be at most {} ms, got {} ms",
                MAX_RENAME_BACKOFF.as_millis(),
                self.rename_backoff.as_millis()
            );
        }
        Ok(())
    }
}
