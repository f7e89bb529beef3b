//! Error types for host configuration.
//!
//! Classification is total and never fails; only reading, writing, and
//! validating configuration files can.

use std::path::PathBuf;

/// Errors from loading or saving a `hostkind.toml`.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The config file does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// Reading or writing the config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML or a value of the wrong type.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A config value could not be written back out as TOML.
    #[error("cannot serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// The config parsed but holds unusable values.
    #[error("config rejected: {detail}")]
    Validation {
        /// Every error-severity issue, joined.
        detail: String,
    },
}

/// Result alias for fallible config operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
