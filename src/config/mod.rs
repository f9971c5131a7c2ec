//! Configuration: types, default paths, XML loading and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV_VAR, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path};

/// Upper bound accepted for `chunk_size`.
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;
/// Upper bound accepted for `rename_retries`.
pub const MAX_RENAME_RETRIES: u32 = 10;
/// Upper bound accepted for `rename_backoff`.
pub const MAX_RENAME_BACKOFF: std::time::Duration = std::time::Duration::from_secs(5);
