//! Locating and loading `hostkind.toml` for the CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hostkind_platform::config::{discover_config, load_config};
use hostkind_platform::HostConfig;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "HOSTKIND_CONFIG";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line.
    Flag(PathBuf),
    /// The `HOSTKIND_CONFIG` variable.
    EnvVar(PathBuf),
    /// A `hostkind.toml` found in the working directory or an ancestor.
    Discovered(PathBuf),
    /// Nothing found; built-in defaults.
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Flag(p) | ConfigSource::EnvVar(p) | ConfigSource::Discovered(p) => {
                Some(p)
            }
            ConfigSource::Defaults => None,
        }
    }
}

/// Pick the config file to use: flag, then environment variable, then the
/// nearest `hostkind.toml` above `start_dir`.
pub fn locate(explicit: Option<&Path>, env_value: Option<PathBuf>, start_dir: &Path) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Flag(path.to_path_buf());
    }
    if let Some(path) = env_value.filter(|p| !p.as_os_str().is_empty()) {
        return ConfigSource::EnvVar(path);
    }
    let mut dir = start_dir.to_path_buf();
    loop {
        if let Some(path) = discover_config(&dir) {
            return ConfigSource::Discovered(path);
        }
        if !dir.pop() {
            break;
        }
    }
    ConfigSource::Defaults
}

/// Load the configuration described by `source`.
pub fn load(source: &ConfigSource) -> Result<HostConfig> {
    match source.path() {
        Some(path) => {
            load_config(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(HostConfig::default()),
    }
}

/// Locate and load in one step, reading `HOSTKIND_CONFIG` from the process.
pub fn resolve(explicit: Option<&Path>, start_dir: &Path) -> Result<(HostConfig, ConfigSource)> {
    let env_value = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let source = locate(explicit, env_value, start_dir);
    tracing::debug!(?source, "config source");
    let config = load(&source)?;
    Ok((config, source))
}
