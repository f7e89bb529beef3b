//! CPU architecture classification.
//!
//! Maps the many vendor spellings of a CPU architecture (`"amd64"`,
//! `"i686"`, `"powerpc64le"`, `"armv7l"`, ...) onto a closed set of
//! canonical [`Architecture`] values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A canonical CPU architecture family.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "x86")]
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    /// Intel Itanium.
    #[serde(rename = "ia64")]
    Ia64,
    /// 32-bit ARM.
    #[serde(rename = "arm")]
    Arm,
    #[serde(rename = "aarch64")]
    AArch64,
    #[serde(rename = "ppc")]
    Ppc,
    #[serde(rename = "ppcle")]
    PpcLe,
    #[serde(rename = "ppc64")]
    Ppc64,
    #[serde(rename = "ppc64le")]
    Ppc64Le,
    /// IBM System/390, 31-bit addressing.
    #[serde(rename = "s390")]
    S390,
    /// IBM z/Architecture.
    #[serde(rename = "s390x")]
    S390x,
    #[serde(rename = "sparc")]
    Sparc,
    #[serde(rename = "sparcv9")]
    SparcV9,
    #[serde(rename = "mips")]
    Mips,
    #[serde(rename = "mipsel")]
    MipsEl,
    #[serde(rename = "mips64")]
    Mips64,
    #[serde(rename = "mips64el")]
    Mips64El,
    #[serde(rename = "riscv")]
    RiscV,
    #[serde(rename = "loong_arch64")]
    LoongArch64,
}

impl Architecture {
    /// Every canonical architecture, `Unknown` first.
    pub const ALL: [Architecture; 20] = [
        Architecture::Unknown,
        Architecture::X86,
        Architecture::X86_64,
        Architecture::Ia64,
        Architecture::Arm,
        Architecture::AArch64,
        Architecture::Ppc,
        Architecture::PpcLe,
        Architecture::Ppc64,
        Architecture::Ppc64Le,
        Architecture::S390,
        Architecture::S390x,
        Architecture::Sparc,
        Architecture::SparcV9,
        Architecture::Mips,
        Architecture::MipsEl,
        Architecture::Mips64,
        Architecture::Mips64El,
        Architecture::RiscV,
        Architecture::LoongArch64,
    ];

    /// Classify a raw architecture name.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything unrecognized, including `None`, is [`Architecture::Unknown`].
    /// Endianness is not considered here; see [`Architecture::with_endianness`].
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Architecture::Unknown;
        };
        let name = raw.trim().to_lowercase();

        match name.as_str() {
            "x86" | "x86-32" | "x86_32" | "x8632" | "i86pc" | "i386" | "i486" | "i586"
            | "i686" | "ia32" | "x32" => return Architecture::X86,
            "x8664" | "x86-64" | "x86_64" | "amd64" | "x64" | "ia32e" | "em64t" => {
                return Architecture::X86_64
            }
            "ia64" | "ia64w" | "itanium" => return Architecture::Ia64,
            "arm" | "arm32" | "aarch32" => return Architecture::Arm,
            "arm64" | "aarch64" => return Architecture::AArch64,
            "loongarch64" | "loong_arch64" => return Architecture::LoongArch64,
            "ppc" | "powerpc" | "ppc32" | "powerpc32" => return Architecture::Ppc,
            "ppcle" | "powerpcle" | "ppc32le" | "powerpc32le" => return Architecture::PpcLe,
            "ppc64" | "powerpc64" => return Architecture::Ppc64,
            "ppc64le" | "powerpc64le" => return Architecture::Ppc64Le,
            "s390" => return Architecture::S390,
            "s390x" => return Architecture::S390x,
            "sparc" => return Architecture::Sparc,
            "sparcv9" => return Architecture::SparcV9,
            "mips" | "mips32" => return Architecture::Mips,
            "mipsel" | "mips32el" => return Architecture::MipsEl,
            "mips64" => return Architecture::Mips64,
            "mips64el" => return Architecture::Mips64El,
            "riscv" | "riscv64" => return Architecture::RiscV,
            _ => {}
        }

        if name.starts_with("armv7") {
            return Architecture::Arm;
        }
        if name.starts_with("armv8") || name.starts_with("armv9") {
            return Architecture::AArch64;
        }

        Architecture::Unknown
    }

    /// Re-map big-endian PowerPC values to their little-endian forms.
    ///
    /// Only `Ppc` and `Ppc64` are affected; the classifier cannot tell them
    /// apart from their little-endian variants by name alone.
    pub fn with_endianness(self, little_endian: bool) -> Self {
        match self {
            Architecture::Ppc if little_endian => Architecture::PpcLe,
            Architecture::Ppc64 if little_endian => Architecture::Ppc64Le,
            other => other,
        }
    }

    /// Canonical lowercase name. Re-parses to `self`.
    pub fn normalized_name(self) -> &'static str {
        match self {
            Architecture::Unknown => "unknown",
            Architecture::X86 => "x86",
            Architecture::X86_64 => "x86_64",
            Architecture::Ia64 => "ia64",
            Architecture::Arm => "arm",
            Architecture::AArch64 => "aarch64",
            Architecture::Ppc => "ppc",
            Architecture::PpcLe => "ppcle",
            Architecture::Ppc64 => "ppc64",
            Architecture::Ppc64Le => "ppc64le",
            Architecture::S390 => "s390",
            Architecture::S390x => "s390x",
            Architecture::Sparc => "sparc",
            Architecture::SparcV9 => "sparcv9",
            Architecture::Mips => "mips",
            Architecture::MipsEl => "mipsel",
            Architecture::Mips64 => "mips64",
            Architecture::Mips64El => "mips64el",
            Architecture::RiscV => "riscv",
            Architecture::LoongArch64 => "loong_arch64",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Architecture::Unknown => "Unknown",
            Architecture::X86 => "x86",
            Architecture::X86_64 => "x86-64",
            Architecture::Ia64 => "IA-64",
            Architecture::Arm => "ARM",
            Architecture::AArch64 => "AArch64",
            Architecture::Ppc => "PowerPC",
            Architecture::PpcLe => "PowerPC (Little-Endian)",
            Architecture::Ppc64 => "PowerPC-64",
            Architecture::Ppc64Le => "PowerPC-64 (Little-Endian)",
            Architecture::S390 => "S390",
            Architecture::S390x => "S390x",
            Architecture::Sparc => "SPARC",
            Architecture::SparcV9 => "SPARC V9",
            Architecture::Mips => "MIPS",
            Architecture::MipsEl => "MIPSel",
            Architecture::Mips64 => "MIPS64",
            Architecture::Mips64El => "MIPS64el",
            Architecture::RiscV => "RISC-V",
            Architecture::LoongArch64 => "LoongArch64",
        }
    }

    /// Whether the architecture has 64-bit pointers and registers.
    pub fn is_64_bit(self) -> bool {
        matches!(
            self,
            Architecture::X86_64
                | Architecture::Ia64
                | Architecture::AArch64
                | Architecture::Ppc64
                | Architecture::Ppc64Le
                | Architecture::S390x
                | Architecture::SparcV9
                | Architecture::Mips64
                | Architecture::Mips64El
                | Architecture::RiscV
                | Architecture::LoongArch64
        )
    }

    /// Native word size in bits.
    pub fn word_size(self) -> u32 {
        if self.is_64_bit() {
            64
        } else {
            32
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.normalized_name())
    }
}

impl FromStr for Architecture {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Architecture::parse(Some(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Architecture {
        Architecture::parse(Some(s))
    }

    #[test]
    fn x86_aliases() {
        for alias in [
            "x86", "i386", "i486", "i586", "i686", "ia32", "x86-32", "x86_32", "x8632", "x32",
            "i86pc",
        ] {
            assert_eq!(parse(alias), Architecture::X86, "{alias}");
        }
    }

    #[test]
    fn x86_64_aliases() {
        for alias in ["amd64", "x64", "x86_64", "x86-64", "ia32e", "em64t", "x8664"] {
            assert_eq!(parse(alias), Architecture::X86_64, "{alias}");
        }
    }

    #[test]
    fn arm_aliases_and_prefixes() {
        assert_eq!(parse("arm"), Architecture::Arm);
        assert_eq!(parse("arm32"), Architecture::Arm);
        assert_eq!(parse("aarch32"), Architecture::Arm);
        assert_eq!(parse("armv7l"), Architecture::Arm);
        assert_eq!(parse("armv7-a"), Architecture::Arm);
        assert_eq!(parse("arm64"), Architecture::AArch64);
        assert_eq!(parse("aarch64"), Architecture::AArch64);
        assert_eq!(parse("armv8l"), Architecture::AArch64);
        assert_eq!(parse("armv9-a"), Architecture::AArch64);
        // Older ARM revisions match neither the table nor a prefix rule.
        assert_eq!(parse("armv6l"), Architecture::Unknown);
    }

    #[test]
    fn powerpc_aliases() {
        assert_eq!(parse("ppc"), Architecture::Ppc);
        assert_eq!(parse("powerpc"), Architecture::Ppc);
        assert_eq!(parse("ppc32"), Architecture::Ppc);
        assert_eq!(parse("powerpc32"), Architecture::Ppc);
        assert_eq!(parse("ppcle"), Architecture::PpcLe);
        assert_eq!(parse("powerpcle"), Architecture::PpcLe);
        assert_eq!(parse("ppc32le"), Architecture::PpcLe);
        assert_eq!(parse("powerpc32le"), Architecture::PpcLe);
        assert_eq!(parse("ppc64"), Architecture::Ppc64);
        assert_eq!(parse("powerpc64"), Architecture::Ppc64);
        assert_eq!(parse("ppc64le"), Architecture::Ppc64Le);
        assert_eq!(parse("powerpc64le"), Architecture::Ppc64Le);
    }

    #[test]
    fn mainframe_sparc_and_mips() {
        assert_eq!(parse("s390"), Architecture::S390);
        assert_eq!(parse("s390x"), Architecture::S390x);
        assert_eq!(parse("sparc"), Architecture::Sparc);
        assert_eq!(parse("sparcv9"), Architecture::SparcV9);
        assert_eq!(parse("mips"), Architecture::Mips);
        assert_eq!(parse("mips32"), Architecture::Mips);
        assert_eq!(parse("mipsel"), Architecture::MipsEl);
        assert_eq!(parse("mips32el"), Architecture::MipsEl);
        assert_eq!(parse("mips64"), Architecture::Mips64);
        assert_eq!(parse("mips64el"), Architecture::Mips64El);
    }

    #[test]
    fn loongarch64_is_not_powerpc() {
        assert_eq!(parse("loongarch64"), Architecture::LoongArch64);
        assert_ne!(parse("loongarch64"), Architecture::Ppc);
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(parse("  AMD64\n"), Architecture::X86_64);
        assert_eq!(parse("\tAArch64 "), Architecture::AArch64);
        assert_eq!(parse("ARMV7L"), Architecture::Arm);
    }

    #[test]
    fn unrecognized_is_unknown() {
        assert_eq!(Architecture::parse(None), Architecture::Unknown);
        assert_eq!(parse(""), Architecture::Unknown);
        assert_eq!(parse("z80"), Architecture::Unknown);
        assert_eq!(parse("x86_64_v3"), Architecture::Unknown);
        assert_eq!(parse("sparv9c"), Architecture::Unknown);
    }

    #[test]
    fn normalized_names_reparse_to_themselves() {
        for arch in Architecture::ALL {
            assert_eq!(parse(arch.normalized_name()), arch, "{arch:?}");
        }
    }

    #[test]
    fn little_endian_remap_only_touches_powerpc() {
        assert_eq!(Architecture::Ppc64.with_endianness(true), Architecture::Ppc64Le);
        assert_eq!(Architecture::Ppc.with_endianness(true), Architecture::PpcLe);
        assert_eq!(Architecture::Ppc64.with_endianness(false), Architecture::Ppc64);
        assert_eq!(Architecture::Mips64.with_endianness(true), Architecture::Mips64);
        assert_eq!(Architecture::X86_64.with_endianness(true), Architecture::X86_64);
    }

    #[test]
    fn bit_width() {
        assert!(Architecture::X86_64.is_64_bit());
        assert!(Architecture::RiscV.is_64_bit());
        assert!(!Architecture::X86.is_64_bit());
        assert!(!Architecture::Unknown.is_64_bit());
        assert_eq!(Architecture::S390.word_size(), 32);
        assert_eq!(Architecture::S390x.word_size(), 64);
    }

    #[test]
    fn serde_uses_normalized_names() {
        let json = serde_json::to_string(&Architecture::LoongArch64).unwrap();
        assert_eq!(json, "\"loong_arch64\"");
        let back: Architecture = serde_json::from_str("\"ppc64le\"").unwrap();
        assert_eq!(back, Architecture::Ppc64Le);
    }

    #[test]
    fn display_and_from_str() {
        assert_eq!(Architecture::X86_64.to_string(), "x86_64");
        assert_eq!(Architecture::X86_64.display_name(), "x86-64");
        assert_eq!("i686".parse::<Architecture>().unwrap(), Architecture::X86);
    }
}
