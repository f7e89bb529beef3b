//! Operating system classification and hierarchy.
//!
//! Operating systems form a forest through their base OS: Android is a
//! Linux, Linux is a Unix; macOS is a Darwin, Darwin is a BSD, BSD is a
//! Unix. Windows and Unix are roots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Runtime identities that turn a Darwin host into iOS.
const IOS_RUNTIMES: &[&str] = &["robovm"];

/// Runtime identities that turn a Linux host into Android.
const ANDROID_RUNTIMES: &[&str] = &["dalvik", "art"];

/// A canonical operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Unknown,
    Unix,
    /// IBM AIX.
    Aix,
    /// Oracle Solaris / SunOS.
    Solaris,
    Linux,
    Android,
    Bsd,
    FreeBsd,
    OpenBsd,
    /// GNU userland on a FreeBSD kernel.
    KFreeBsd,
    NetBsd,
    DragonFly,
    Darwin,
    MacOs,
    #[serde(rename = "ios")]
    IOs,
    Windows,
}

impl OperatingSystem {
    /// Every canonical operating system, `Unknown` first.
    pub const ALL: [OperatingSystem; 16] = [
        OperatingSystem::Unknown,
        OperatingSystem::Unix,
        OperatingSystem::Aix,
        OperatingSystem::Solaris,
        OperatingSystem::Linux,
        OperatingSystem::Android,
        OperatingSystem::Bsd,
        OperatingSystem::FreeBsd,
        OperatingSystem::OpenBsd,
        OperatingSystem::KFreeBsd,
        OperatingSystem::NetBsd,
        OperatingSystem::DragonFly,
        OperatingSystem::Darwin,
        OperatingSystem::MacOs,
        OperatingSystem::IOs,
        OperatingSystem::Windows,
    ];

    /// Classify a raw operating system name.
    ///
    /// Prefix rules are tried in a fixed order and the first match wins, so
    /// `"Mac OS X"` is macOS and `"Darwin"` is Darwin. Names that match no
    /// rule, including `None`, are [`OperatingSystem::Unknown`].
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return OperatingSystem::Unknown;
        };
        let name = raw.trim().to_lowercase();

        const PREFIXES: &[(&str, OperatingSystem)] = &[
            ("windows", OperatingSystem::Windows),
            ("mac", OperatingSystem::MacOs),
            ("darwin", OperatingSystem::Darwin),
            ("linux", OperatingSystem::Linux),
        ];
        for (prefix, os) in PREFIXES {
            if name.starts_with(prefix) {
                return *os;
            }
        }
        if name == "gnu" {
            return OperatingSystem::Linux;
        }

        const UNIX_PREFIXES: &[(&str, OperatingSystem)] = &[
            ("aix", OperatingSystem::Aix),
            ("solaris", OperatingSystem::Solaris),
            ("sunos", OperatingSystem::Solaris),
            ("freebsd", OperatingSystem::FreeBsd),
            ("openbsd", OperatingSystem::OpenBsd),
            ("netbsd", OperatingSystem::NetBsd),
            ("dragonfly", OperatingSystem::DragonFly),
        ];
        for (prefix, os) in UNIX_PREFIXES {
            if name.starts_with(prefix) {
                return *os;
            }
        }
        if name == "gnu/kfreebsd" {
            return OperatingSystem::KFreeBsd;
        }

        // Normalized names the prefix rules never produce.
        match name.as_str() {
            "unix" => OperatingSystem::Unix,
            "android" => OperatingSystem::Android,
            "bsd" => OperatingSystem::Bsd,
            "kfreebsd" => OperatingSystem::KFreeBsd,
            "ios" => OperatingSystem::IOs,
            _ => OperatingSystem::Unknown,
        }
    }

    /// Apply a runtime identity reported by the host.
    ///
    /// A Darwin kernel running a mobile runtime is iOS; a Linux kernel
    /// running an Android runtime is Android. Everything else is unchanged.
    pub fn with_runtime(self, runtime: Option<&str>) -> Self {
        let Some(runtime) = runtime.map(|r| r.trim().to_lowercase()) else {
            return self;
        };
        match self {
            OperatingSystem::Darwin if IOS_RUNTIMES.contains(&runtime.as_str()) => {
                OperatingSystem::IOs
            }
            OperatingSystem::Linux if ANDROID_RUNTIMES.contains(&runtime.as_str()) => {
                OperatingSystem::Android
            }
            other => other,
        }
    }

    /// The immediate parent in the OS hierarchy, if any.
    pub fn base(self) -> Option<OperatingSystem> {
        use OperatingSystem::*;
        match self {
            Unknown | Unix | Windows => None,
            Aix | Solaris | Linux | Bsd => Some(Unix),
            Android => Some(Linux),
            FreeBsd | OpenBsd | KFreeBsd | NetBsd | DragonFly | Darwin => Some(Bsd),
            MacOs | IOs => Some(Darwin),
        }
    }

    /// Iterate over the base chain, nearest ancestor first.
    pub fn ancestors(self) -> impl Iterator<Item = OperatingSystem> {
        std::iter::successors(self.base(), |os| os.base())
    }

    /// Whether `self` is `other` or descends from it.
    pub fn is(self, other: OperatingSystem) -> bool {
        self == other || self.ancestors().any(|os| os == other)
    }

    /// Unix or any descendant of it.
    pub fn is_unix_like(self) -> bool {
        self.is(OperatingSystem::Unix)
    }

    /// BSD or any descendant of it, Apple systems included.
    pub fn is_bsd(self) -> bool {
        self.is(OperatingSystem::Bsd)
    }

    /// Darwin, macOS, or iOS.
    pub fn is_darwin(self) -> bool {
        matches!(
            self,
            OperatingSystem::Darwin | OperatingSystem::MacOs | OperatingSystem::IOs
        )
    }

    /// Canonical lowercase name. Re-parses to `self`.
    pub fn normalized_name(self) -> &'static str {
        match self {
            OperatingSystem::Unknown => "unknown",
            OperatingSystem::Unix => "unix",
            OperatingSystem::Aix => "aix",
            OperatingSystem::Solaris => "solaris",
            OperatingSystem::Linux => "linux",
            OperatingSystem::Android => "android",
            OperatingSystem::Bsd => "bsd",
            OperatingSystem::FreeBsd => "freebsd",
            OperatingSystem::OpenBsd => "openbsd",
            OperatingSystem::KFreeBsd => "kfreebsd",
            OperatingSystem::NetBsd => "netbsd",
            OperatingSystem::DragonFly => "dragonfly",
            OperatingSystem::Darwin => "darwin",
            OperatingSystem::MacOs => "macos",
            OperatingSystem::IOs => "ios",
            OperatingSystem::Windows => "windows",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            OperatingSystem::Unknown => "Unknown",
            OperatingSystem::Unix => "Unix",
            OperatingSystem::Aix => "AIX",
            OperatingSystem::Solaris => "Solaris",
            OperatingSystem::Linux => "Linux",
            OperatingSystem::Android => "Android",
            OperatingSystem::Bsd => "BSD",
            OperatingSystem::FreeBsd => "FreeBSD",
            OperatingSystem::OpenBsd => "OpenBSD",
            OperatingSystem::KFreeBsd => "GNU/kFreeBSD",
            OperatingSystem::NetBsd => "NetBSD",
            OperatingSystem::DragonFly => "DragonFly BSD",
            OperatingSystem::Darwin => "Darwin",
            OperatingSystem::MacOs => "macOS",
            OperatingSystem::IOs => "iOS",
            OperatingSystem::Windows => "Windows",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.normalized_name())
    }
}

impl FromStr for OperatingSystem {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(OperatingSystem::parse(Some(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> OperatingSystem {
        OperatingSystem::parse(Some(s))
    }

    #[test]
    fn vendor_spellings() {
        assert_eq!(parse("Windows 10"), OperatingSystem::Windows);
        assert_eq!(parse("Windows Server 2022"), OperatingSystem::Windows);
        assert_eq!(parse("Mac OS X"), OperatingSystem::MacOs);
        assert_eq!(parse("macos"), OperatingSystem::MacOs);
        assert_eq!(parse("Darwin"), OperatingSystem::Darwin);
        assert_eq!(parse("Linux"), OperatingSystem::Linux);
        assert_eq!(parse("GNU"), OperatingSystem::Linux);
        assert_eq!(parse("AIX"), OperatingSystem::Aix);
        assert_eq!(parse("Solaris"), OperatingSystem::Solaris);
        assert_eq!(parse("SunOS"), OperatingSystem::Solaris);
        assert_eq!(parse("FreeBSD"), OperatingSystem::FreeBsd);
        assert_eq!(parse("OpenBSD"), OperatingSystem::OpenBsd);
        assert_eq!(parse("NetBSD"), OperatingSystem::NetBsd);
        assert_eq!(parse("DragonFly"), OperatingSystem::DragonFly);
        assert_eq!(parse("GNU/kFreeBSD"), OperatingSystem::KFreeBsd);
    }

    #[test]
    fn exact_rules_do_not_match_prefixes() {
        assert_eq!(parse("gnu/hurd"), OperatingSystem::Unknown);
        assert_eq!(parse("gnu/kfreebsd-9"), OperatingSystem::Unknown);
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(parse("  LINUX  "), OperatingSystem::Linux);
        assert_eq!(parse("\twindows xp\n"), OperatingSystem::Windows);
    }

    #[test]
    fn unrecognized_is_unknown() {
        assert_eq!(OperatingSystem::parse(None), OperatingSystem::Unknown);
        assert_eq!(parse(""), OperatingSystem::Unknown);
        assert_eq!(parse("haiku"), OperatingSystem::Unknown);
        assert_eq!(parse("os/2"), OperatingSystem::Unknown);
    }

    #[test]
    fn normalized_names_reparse_to_themselves() {
        for os in OperatingSystem::ALL {
            assert_eq!(parse(os.normalized_name()), os, "{os:?}");
        }
    }

    #[test]
    fn base_chains_are_short_and_terminate() {
        for os in OperatingSystem::ALL {
            let depth = os.ancestors().count();
            assert!(depth <= 4, "{os:?} has depth {depth}");
            if let Some(root) = os.ancestors().last() {
                assert!(root.base().is_none());
            }
        }
        assert_eq!(
            OperatingSystem::MacOs.ancestors().collect::<Vec<_>>(),
            vec![
                OperatingSystem::Darwin,
                OperatingSystem::Bsd,
                OperatingSystem::Unix
            ]
        );
        assert_eq!(
            OperatingSystem::Android.ancestors().collect::<Vec<_>>(),
            vec![OperatingSystem::Linux, OperatingSystem::Unix]
        );
    }

    #[test]
    fn unix_like_set() {
        let unix: Vec<_> = OperatingSystem::ALL
            .into_iter()
            .filter(|os| os.is_unix_like())
            .collect();
        assert_eq!(
            unix,
            vec![
                OperatingSystem::Unix,
                OperatingSystem::Aix,
                OperatingSystem::Solaris,
                OperatingSystem::Linux,
                OperatingSystem::Android,
                OperatingSystem::Bsd,
                OperatingSystem::FreeBsd,
                OperatingSystem::OpenBsd,
                OperatingSystem::KFreeBsd,
                OperatingSystem::NetBsd,
                OperatingSystem::DragonFly,
                OperatingSystem::Darwin,
                OperatingSystem::MacOs,
                OperatingSystem::IOs,
            ]
        );
    }

    #[test]
    fn is_walks_the_chain() {
        assert!(OperatingSystem::Android.is(OperatingSystem::Linux));
        assert!(OperatingSystem::IOs.is(OperatingSystem::Bsd));
        assert!(OperatingSystem::Linux.is(OperatingSystem::Linux));
        assert!(!OperatingSystem::Linux.is(OperatingSystem::Android));
        assert!(!OperatingSystem::Windows.is(OperatingSystem::Unix));
        assert!(!OperatingSystem::Unknown.is_unix_like());
    }

    #[test]
    fn bsd_and_darwin_predicates() {
        assert!(OperatingSystem::MacOs.is_bsd());
        assert!(OperatingSystem::KFreeBsd.is_bsd());
        assert!(!OperatingSystem::Linux.is_bsd());
        assert!(OperatingSystem::IOs.is_darwin());
        assert!(OperatingSystem::Darwin.is_darwin());
        assert!(!OperatingSystem::Bsd.is_darwin());
        assert!(!OperatingSystem::FreeBsd.is_darwin());
    }

    #[test]
    fn runtime_overrides() {
        assert_eq!(
            OperatingSystem::Darwin.with_runtime(Some("RoboVM")),
            OperatingSystem::IOs
        );
        assert_eq!(
            OperatingSystem::Linux.with_runtime(Some("Dalvik")),
            OperatingSystem::Android
        );
        // Overrides only apply to the matching kernel.
        assert_eq!(
            OperatingSystem::MacOs.with_runtime(Some("robovm")),
            OperatingSystem::MacOs
        );
        assert_eq!(
            OperatingSystem::FreeBsd.with_runtime(Some("dalvik")),
            OperatingSystem::FreeBsd
        );
        assert_eq!(
            OperatingSystem::Linux.with_runtime(Some("OpenJDK 64-Bit Server VM")),
            OperatingSystem::Linux
        );
        assert_eq!(OperatingSystem::Linux.with_runtime(None), OperatingSystem::Linux);
    }

    #[test]
    fn serde_uses_normalized_names() {
        for os in OperatingSystem::ALL {
            let json = serde_json::to_string(&os).unwrap();
            assert_eq!(json, format!("\"{}\"", os.normalized_name()));
        }
    }
}
