//! Platform model.
//!
//! A platform is an operating system paired with an architecture. The
//! data model, C library name, and application data directory layout all
//! follow from the pair.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::arch::Architecture;
use crate::data_model::DataModel;
use crate::env::Environment;
use crate::os::OperatingSystem;

/// An operating system and CPU architecture pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Platform {
    /// Operating system, after any runtime identity override.
    pub operating_system: OperatingSystem,
    /// CPU architecture, after any endianness re-mapping.
    pub architecture: Architecture,
}

impl Platform {
    /// Pair an already-classified OS and architecture.
    pub fn new(operating_system: OperatingSystem, architecture: Architecture) -> Self {
        Self {
            operating_system,
            architecture,
        }
    }

    /// Whether the architecture has a 64-bit word.
    pub fn is_64_bit(&self) -> bool {
        self.architecture.is_64_bit()
    }

    /// ILP32 on 32-bit architectures, LLP64 on 64-bit Windows, LP64 elsewhere.
    pub fn data_model(&self) -> DataModel {
        if !self.architecture.is_64_bit() {
            DataModel::Ilp32
        } else if self.operating_system == OperatingSystem::Windows {
            DataModel::Llp64
        } else {
            DataModel::Lp64
        }
    }

    /// Width of C `short` in bits.
    pub fn short_size(&self) -> u32 {
        self.data_model().short_size()
    }

    /// Width of C `int` in bits.
    pub fn int_size(&self) -> u32 {
        self.data_model().int_size()
    }

    /// Width of C `long` in bits.
    pub fn long_size(&self) -> u32 {
        self.data_model().long_size()
    }

    /// Width of C `long long` in bits.
    pub fn long_long_size(&self) -> u32 {
        self.data_model().long_long_size()
    }

    /// Name of the platform's standard C library, as passed to a dynamic
    /// loader.
    pub fn c_library_name(&self) -> &'static str {
        if self.operating_system == OperatingSystem::Windows {
            return "msvcrt";
        }
        if self.operating_system == OperatingSystem::Aix {
            return if self.architecture.is_64_bit() {
                "libc.a(shr_64.o)"
            } else {
                "libc.a(shr.o)"
            };
        }
        if self.operating_system.is_darwin() {
            return "System";
        }
        "c"
    }

    /// Directory an application named `folder` should keep its data in.
    ///
    /// - Windows: `%APPDATA%\folder`, else `~/.folder`
    /// - macOS: `~/Library/Application Support/folder`
    /// - otherwise: `$XDG_DATA_HOME/folder`, else `~/.local/share/folder`
    ///
    /// Unusable environment values fall back silently.
    pub fn app_data_dir(&self, folder: &str, env: &impl Environment) -> PathBuf {
        match self.operating_system {
            OperatingSystem::Windows => {
                if let Some(appdata) = env_dir(env, "APPDATA", false) {
                    return appdata.join(folder);
                }
                home(env).join(format!(".{folder}"))
            }
            OperatingSystem::MacOs => home(env)
                .join("Library")
                .join("Application Support")
                .join(folder),
            _ => {
                if let Some(data_home) = env_dir(env, "XDG_DATA_HOME", true) {
                    return data_home.join(folder);
                }
                home(env).join(".local").join("share").join(folder)
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.operating_system, self.architecture)
    }
}

/// A directory named by an environment variable, if it is usable as a
/// path base.
fn env_dir(env: &impl Environment, key: &str, require_root: bool) -> Option<PathBuf> {
    let value = env.var(key)?;
    if value.is_empty() || value.contains('\0') {
        tracing::debug!(key, "ignoring unusable directory from environment");
        return None;
    }
    let path = PathBuf::from(value);
    if require_root && !path.has_root() {
        tracing::debug!(key, path = %path.display(), "ignoring relative directory from environment");
        return None;
    }
    Some(path)
}

fn home(env: &impl Environment) -> PathBuf {
    env.home_dir().unwrap_or_else(|| {
        tracing::warn!("home directory unknown; application data path will be relative");
        PathBuf::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvironment;

    fn home_env() -> MapEnvironment {
        MapEnvironment::new().with_home("/home/alice")
    }

    #[test]
    fn data_models() {
        assert_eq!(
            Platform::new(OperatingSystem::Windows, Architecture::X86_64).data_model(),
            DataModel::Llp64
        );
        assert_eq!(
            Platform::new(OperatingSystem::Linux, Architecture::X86_64).data_model(),
            DataModel::Lp64
        );
        assert_eq!(
            Platform::new(OperatingSystem::Linux, Architecture::X86).data_model(),
            DataModel::Ilp32
        );
        assert_eq!(
            Platform::new(OperatingSystem::Windows, Architecture::X86).data_model(),
            DataModel::Ilp32
        );
        assert_eq!(
            Platform::new(OperatingSystem::MacOs, Architecture::AArch64).long_size(),
            64
        );
        assert_eq!(
            Platform::new(OperatingSystem::Windows, Architecture::AArch64).long_size(),
            32
        );
    }

    #[test]
    fn c_library_names() {
        assert_eq!(
            Platform::new(OperatingSystem::Aix, Architecture::X86_64).c_library_name(),
            "libc.a(shr_64.o)"
        );
        assert_eq!(
            Platform::new(OperatingSystem::Aix, Architecture::Ppc).c_library_name(),
            "libc.a(shr.o)"
        );
        for arch in Architecture::ALL {
            assert_eq!(
                Platform::new(OperatingSystem::Windows, arch).c_library_name(),
                "msvcrt"
            );
            assert_eq!(
                Platform::new(OperatingSystem::MacOs, arch).c_library_name(),
                "System"
            );
        }
        assert_eq!(
            Platform::new(OperatingSystem::IOs, Architecture::AArch64).c_library_name(),
            "System"
        );
        assert_eq!(
            Platform::new(OperatingSystem::Linux, Architecture::X86_64).c_library_name(),
            "c"
        );
        assert_eq!(
            Platform::new(OperatingSystem::FreeBsd, Architecture::X86_64).c_library_name(),
            "c"
        );
    }

    #[test]
    fn macos_data_dir() {
        let p = Platform::new(OperatingSystem::MacOs, Architecture::AArch64);
        let dir = p.app_data_dir("Foo", &home_env());
        assert!(dir.ends_with("Library/Application Support/Foo"));
        assert_eq!(
            dir,
            PathBuf::from("/home/alice/Library/Application Support/Foo")
        );
    }

    #[test]
    fn linux_data_dir_without_xdg() {
        let p = Platform::new(OperatingSystem::Linux, Architecture::X86_64);
        let dir = p.app_data_dir("Foo", &home_env());
        assert!(dir.ends_with(".local/share/Foo"));
        assert_eq!(dir, PathBuf::from("/home/alice/.local/share/Foo"));
    }

    #[test]
    fn linux_data_dir_with_xdg() {
        let p = Platform::new(OperatingSystem::Linux, Architecture::X86_64);
        let env = home_env().with_var("XDG_DATA_HOME", "/xdg/data");
        assert_eq!(p.app_data_dir("Foo", &env), PathBuf::from("/xdg/data/Foo"));
    }

    #[test]
    fn unusable_xdg_falls_back() {
        let p = Platform::new(OperatingSystem::FreeBsd, Architecture::X86_64);
        for bad in ["", "relative/data", "/bad\0path"] {
            let env = home_env().with_var("XDG_DATA_HOME", bad);
            assert!(
                p.app_data_dir("Foo", &env).ends_with(".local/share/Foo"),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn windows_data_dir() {
        let p = Platform::new(OperatingSystem::Windows, Architecture::X86_64);
        let env = home_env().with_var("APPDATA", "/roaming");
        assert_eq!(p.app_data_dir("Foo", &env), PathBuf::from("/roaming/Foo"));

        let dir = p.app_data_dir("Foo", &home_env());
        assert_eq!(dir, PathBuf::from("/home/alice/.Foo"));

        let env = home_env().with_var("APPDATA", "");
        assert_eq!(p.app_data_dir("Foo", &env), PathBuf::from("/home/alice/.Foo"));
    }

    #[test]
    fn darwin_without_macos_uses_xdg_layout() {
        let p = Platform::new(OperatingSystem::Darwin, Architecture::X86_64);
        assert!(p.app_data_dir("Foo", &home_env()).ends_with(".local/share/Foo"));
    }

    #[test]
    fn missing_home_gives_relative_path() {
        let p = Platform::new(OperatingSystem::Linux, Architecture::X86_64);
        let dir = p.app_data_dir("Foo", &MapEnvironment::new());
        assert_eq!(dir, PathBuf::from(".local/share/Foo"));
    }

    #[test]
    fn equality_and_display() {
        use std::collections::HashSet;

        let a = Platform::new(OperatingSystem::Linux, Architecture::X86_64);
        let b = Platform::new(OperatingSystem::Linux, Architecture::X86_64);
        let c = Platform::new(OperatingSystem::Linux, Architecture::AArch64);
        assert_eq!(a, b);
        assert_ne!(a, c);
        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(a.to_string(), "linux-x86_64");
        assert_eq!(
            Platform::new(OperatingSystem::MacOs, Architecture::LoongArch64).to_string(),
            "macos-loong_arch64"
        );
    }
}
