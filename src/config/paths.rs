//! Default path helpers and symlink checks.
//! Resolves the config file location and detects symlinked ancestors of a log path.

use anyhow::{Result, anyhow};
use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SYNC_FILEOPS_CONFIG";

const APP_DIR: &str = "sync_fileops";

/// Config path: `$SYNC_FILEOPS_CONFIG` if set, else `<config_dir>/sync_fileops/config.xml`.
/// A relative env value is resolved against the current directory.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV_VAR) {
        let p = PathBuf::from(p);
        if p.is_relative() {
            return Ok(env::current_dir()?.join(p));
        }
        return Ok(p);
    }
    config_dir()
        .map(|base| base.join(APP_DIR).join("config.xml"))
        .ok_or_else(|| anyhow!("could not determine a config directory for this user"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.as_os_str().is_empty() {
            break;
        }
        match fs::symlink_metadata(anc) {
            Ok(meta) if meta.file_type().is_symlink() => return Ok(true),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        p = anc.parent();
    }
    Ok(false)
}
