//! The platform this process runs on.
//!
//! Two platforms are resolved once per process:
//! - **current:** what the running binary sees. Under WOW64 or a binary
//!   translator this can be a different architecture than the hardware.
//! - **system:** best-effort view of the real hardware. Equal to the
//!   current platform whenever the probes cannot tell otherwise.
//!
//! [`init`] and [`get`] hand out the process-wide value. Code that needs a
//! fixed host (tests, cross tooling) builds a [`HostPlatforms`] from a
//! [`RawHost`] instead.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::arch::Architecture;
use crate::config::{HostConfig, Overrides};
use crate::env::{Environment, SystemEnvironment};
use crate::os::OperatingSystem;
use crate::platform::Platform;
use crate::probe;

static HOST: OnceCell<HostPlatforms> = OnceCell::new();

/// Raw, unclassified facts about a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawHost {
    /// OS name as the host reports it, e.g. `"Mac OS X"`.
    pub os_name: Option<String>,
    /// Kernel or OS release string.
    pub os_version: Option<String>,
    /// Architecture name as the running process sees it.
    pub arch_name: Option<String>,
    /// `None` is treated as big-endian.
    pub little_endian: Option<bool>,
    /// Identity of the runtime hosting the process, if it has one.
    pub runtime: Option<String>,
    /// Architecture name reported by a probe of the hardware.
    pub system_arch_name: Option<String>,
}

impl RawHost {
    /// Facts fixed when this crate was compiled.
    pub fn from_build() -> Self {
        Self {
            os_name: Some(std::env::consts::OS.to_string()),
            os_version: None,
            arch_name: Some(
                build_arch_name(std::env::consts::ARCH, cfg!(target_endian = "little"))
                    .to_string(),
            ),
            little_endian: Some(cfg!(target_endian = "little")),
            runtime: None,
            system_arch_name: None,
        }
    }

    /// Classify the OS and architecture names into a platform.
    ///
    /// Applies the little-endian PowerPC re-mapping and the runtime identity
    /// overrides on top of the plain classifiers.
    pub fn current_platform(&self) -> Platform {
        let operating_system = OperatingSystem::parse(self.os_name.as_deref())
            .with_runtime(self.runtime.as_deref());
        let architecture = Architecture::parse(self.arch_name.as_deref())
            .with_endianness(self.little_endian.unwrap_or(false));
        Platform::new(operating_system, architecture)
    }

    /// Replace fields with any values pinned in `overrides`.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(os_name) = &overrides.os_name {
            self.os_name = Some(os_name.clone());
        }
        if let Some(os_version) = &overrides.os_version {
            self.os_version = Some(os_version.clone());
        }
        if let Some(arch_name) = &overrides.arch_name {
            self.arch_name = Some(arch_name.clone());
        }
        if let Some(little_endian) = overrides.little_endian {
            self.little_endian = Some(little_endian);
        }
        if let Some(runtime) = &overrides.runtime {
            self.runtime = Some(runtime.clone());
        }
        if let Some(system_arch_name) = &overrides.system_arch_name {
            self.system_arch_name = Some(system_arch_name.clone());
        }
    }
}

/// Rust's spelling of a few targets differs from every vendor spelling the
/// classifier knows. MIPS is named the same on both endiannesses.
fn build_arch_name(arch: &str, little_endian: bool) -> &str {
    match arch {
        "sparc64" => "sparcv9",
        "mips" if little_endian => "mipsel",
        "mips64" if little_endian => "mips64el",
        other => other,
    }
}

/// The resolved current and system platforms, with the raw names they
/// came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HostPlatforms {
    /// Raw OS name the platforms were classified from.
    pub os_name: Option<String>,
    /// Kernel or OS release, when known.
    pub os_version: Option<String>,
    /// Raw architecture name of the running process.
    pub current_arch_name: Option<String>,
    /// Raw architecture name of the hardware; the current name when no
    /// probe produced a usable answer.
    pub system_arch_name: Option<String>,
    /// Platform the running binary sees.
    pub current: Platform,
    /// Best-effort platform of the underlying hardware.
    pub system: Platform,
}

impl HostPlatforms {
    /// Classify raw host facts. Runs no probes.
    pub fn resolve(raw: &RawHost) -> Self {
        let current = raw.current_platform();
        let system_arch = Architecture::parse(raw.system_arch_name.as_deref())
            .with_endianness(raw.little_endian.unwrap_or(false));

        let (system, system_arch_name) = if system_arch == Architecture::Unknown {
            (current, raw.arch_name.clone())
        } else {
            (
                Platform::new(current.operating_system, system_arch),
                raw.system_arch_name.clone(),
            )
        };

        Self {
            os_name: raw.os_name.clone(),
            os_version: raw.os_version.clone(),
            current_arch_name: raw.arch_name.clone(),
            system_arch_name,
            current,
            system,
        }
    }

    /// Detect the host: build facts, then config overrides, then probes for
    /// anything still missing.
    pub fn detect(config: &HostConfig, env: &impl Environment) -> Self {
        let mut raw = RawHost::from_build();
        raw.apply(&config.overrides);

        let os = OperatingSystem::parse(raw.os_name.as_deref());
        if raw.system_arch_name.is_none() {
            raw.system_arch_name = probe::system_arch_name(os, env, &config.probe);
        }
        if raw.os_version.is_none() {
            raw.os_version = probe::os_version(os, &config.probe);
        }

        let host = Self::resolve(&raw);
        tracing::debug!(
            current = %host.current,
            system = %host.system,
            "resolved host platforms"
        );
        host
    }

    /// Whether the process runs on a different architecture than the
    /// hardware it is on.
    pub fn is_translated(&self) -> bool {
        self.current != self.system
    }
}

/// Resolve the process-wide host platforms with `config`.
///
/// Only the first call (or the first [`get`]) does any work; later calls
/// return the existing value and ignore their config.
pub fn init(config: &HostConfig) -> &'static HostPlatforms {
    let mut initialized = false;
    let host = HOST.get_or_init(|| {
        initialized = true;
        HostPlatforms::detect(config, &SystemEnvironment)
    });
    if !initialized {
        tracing::debug!("host platforms already resolved; config ignored");
    }
    host
}

/// The process-wide host platforms, resolved with the default config on
/// first use.
pub fn get() -> &'static HostPlatforms {
    HOST.get_or_init(|| HostPlatforms::detect(&HostConfig::default(), &SystemEnvironment))
}

/// The platform the running binary sees.
pub fn current_platform() -> Platform {
    get().current
}

/// Best-effort platform of the underlying hardware.
pub fn system_platform() -> Platform {
    get().system
}
