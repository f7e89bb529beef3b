//! TOML configuration for host detection.
//!
//! A `hostkind.toml` file can pin any of the raw host strings (useful in
//! containers and cross-build sandboxes that misreport themselves) and
//! tune the best-effort hardware probes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::arch::Architecture;
use crate::error::{PlatformError, Result};
use crate::os::OperatingSystem;

/// File name looked up by [`discover_config`].
pub const CONFIG_FILE_NAME: &str = "hostkind.toml";

/// Upper bound accepted for probe timeouts.
pub const MAX_PROBE_TIMEOUT_MS: u64 = 60_000;

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HostConfig {
    /// Raw values that replace what the process reports about itself.
    pub overrides: Overrides,
    /// Hardware probe settings.
    pub probe: ProbeSettings,
}

/// Raw host strings that take precedence over detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub little_endian: Option<bool>,
    /// Runtime identity, e.g. `"dalvik"` or `"robovm"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    /// True hardware architecture. Setting this skips the probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_arch_name: Option<String>,
}

/// Settings for the process-spawning probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProbeSettings {
    /// Whether probes may run at all.
    pub enabled: bool,
    /// Command printing the hardware architecture name.
    pub command: Vec<String>,
    /// Command printing the kernel release.
    pub version_command: Vec<String>,
    /// How long a probe may run before it is killed.
    pub timeout_ms: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec!["uname".into(), "-m".into()],
            version_command: vec!["uname".into(), "-r".into()],
            timeout_ms: 3000,
        }
    }
}

/// How serious a [`ValidationIssue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A problem found in a configuration.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Errors reject the config; warnings are only logged.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// Load and validate a configuration file.
///
/// Warnings are logged; errors fail the load.
pub fn load_config(path: &Path) -> Result<HostConfig> {
    if !path.exists() {
        return Err(PlatformError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    if let Err(issues) = validate_config(&config) {
        let mut errors = Vec::new();
        for issue in issues {
            match issue.severity {
                Severity::Warning => {
                    tracing::warn!(path = %path.display(), "{}", issue.message);
                }
                Severity::Error => errors.push(issue.message),
            }
        }
        if !errors.is_empty() {
            return Err(PlatformError::Validation {
                detail: errors.join("; "),
            });
        }
    }
    tracing::debug!(path = %path.display(), "loaded host config");
    Ok(config)
}

/// Parse a configuration from a TOML string without validating it.
pub fn parse_config(toml_str: &str) -> Result<HostConfig> {
    Ok(toml::from_str(toml_str)?)
}

/// Serialize a configuration to pretty TOML.
pub fn config_to_toml(config: &HostConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// Check a configuration for values that cannot work or look mistaken.
///
/// Returns `Ok(())` if there is nothing to report.
pub fn validate_config(config: &HostConfig) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let probe = &config.probe;

    if probe.enabled {
        for (key, command) in [
            ("command", &probe.command),
            ("version-command", &probe.version_command),
        ] {
            if command.first().map_or(true, |program| program.trim().is_empty()) {
                issues.push(ValidationIssue {
                    severity: Severity::Error,
                    message: format!("probe {key} is empty"),
                });
            }
        }
        if probe.timeout_ms == 0 {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: "probe timeout-ms must be greater than 0".into(),
            });
        } else if probe.timeout_ms > MAX_PROBE_TIMEOUT_MS {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!(
                    "probe timeout-ms ({}) exceeds the maximum of {MAX_PROBE_TIMEOUT_MS}",
                    probe.timeout_ms
                ),
            });
        }
    }

    let overrides = &config.overrides;
    if let Some(name) = &overrides.os_name {
        if OperatingSystem::parse(Some(name)) == OperatingSystem::Unknown {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                message: format!("os-name override '{name}' is not a recognized operating system"),
            });
        }
    }
    for (key, value) in [
        ("arch-name", &overrides.arch_name),
        ("system-arch-name", &overrides.system_arch_name),
    ] {
        if let Some(name) = value {
            if Architecture::parse(Some(name)) == Architecture::Unknown {
                issues.push(ValidationIssue {
                    severity: Severity::Warning,
                    message: format!("{key} override '{name}' is not a recognized architecture"),
                });
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Generate a template holding the default probe settings.
pub fn generate_template() -> Result<String> {
    config_to_toml(&HostConfig::default())
}

/// Look for a `hostkind.toml` in `dir`.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}
