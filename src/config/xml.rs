//! XML configuration support.
//! - Parses config.xml with quick_xml + serde.
//! - Absent tags keep their defaults; unknown tags are an error.
//! - A missing config file means "use defaults".
//!
//! Example:
//! <config>
//!   <log_level>normal</log_level>
//!   <log_file>/var/log/sync_fileops.log</log_file>
//!   <chunk_size>4096</chunk_size>
//!   <durability>full</durability>
//!   <rename_retries>3</rename_retries>
//!   <rename_backoff_ms>100</rename_backoff_ms>
//! </config>

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};
use crate::fs_ops::Durability;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    chunk_size: Option<usize>,
    durability: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    rename_retries: Option<u32>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    rename_backoff_ms: Option<u64>,
}

// Numbers in XML text often carry surrounding whitespace.
fn de_trimmed_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    if let Some(n) = parsed.chunk_size {
        cfg.chunk_size = n;
    }
    if let Some(s) = parsed.durability.as_deref() {
        cfg.durability = Durability::parse(s)
            .ok_or_else(|| anyhow!("invalid durability: '{}' (expected full or buffered)", s.trim()))?;
    }
    if let Some(n) = parsed.rename_retries {
        cfg.rename_retries = n;
    }
    if let Some(ms) = parsed.rename_backoff_ms {
        cfg.rename_backoff = Duration::from_millis(ms);
    }
    Ok(cfg)
}

/// Load and validate a Config from a specific XML file.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    let cfg = xml_to_config(parsed)
        .with_context(|| format!("invalid value in config xml '{}'", path.display()))?;
    cfg.validate()
        .with_context(|| format!("config xml '{}'", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

/// Load the config from `explicit` if given, else from the default location.
/// Only an explicit path must exist; a missing default file yields defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return load_config_from_xml_path(p);
    }
    let path = default_config_path().context("resolve default config path")?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }
    load_config_from_xml_path(&path)
}
