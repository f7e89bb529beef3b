//! `hostkind describe` — derivations for an OS/architecture pair.

use std::fmt::Write as _;

use anyhow::Result;
use hostkind_platform::{Architecture, DataModel, OperatingSystem, Platform, TypeWidths};
use serde::Serialize;

use super::OutputFormat;

/// Everything derivable from a platform.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformReport {
    pub platform: String,
    pub operating_system: OperatingSystem,
    pub os_display_name: &'static str,
    pub os_family: Vec<OperatingSystem>,
    pub architecture: Architecture,
    pub arch_display_name: &'static str,
    pub is_64_bit: bool,
    pub data_model: DataModel,
    pub c_library: &'static str,
    pub type_widths: TypeWidths,
}

impl PlatformReport {
    pub fn new(platform: Platform) -> Self {
        let os = platform.operating_system;
        let arch = platform.architecture;
        Self {
            platform: platform.to_string(),
            operating_system: os,
            os_display_name: os.display_name(),
            os_family: os.ancestors().collect(),
            architecture: arch,
            arch_display_name: arch.display_name(),
            is_64_bit: platform.is_64_bit(),
            data_model: platform.data_model(),
            c_library: platform.c_library_name(),
            type_widths: platform.data_model().widths(),
        }
    }

    /// Indented text block, one fact per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let family = if self.os_family.is_empty() {
            "-".to_string()
        } else {
            self.os_family
                .iter()
                .map(|os| os.display_name())
                .collect::<Vec<_>>()
                .join(" < ")
        };
        let w = &self.type_widths;
        let _ = writeln!(out, "  OS:           {} ({})", self.os_display_name, self.operating_system);
        let _ = writeln!(out, "  Family:       {family}");
        let _ = writeln!(out, "  Architecture: {} ({})", self.arch_display_name, self.architecture);
        let _ = writeln!(out, "  64-bit:       {}", if self.is_64_bit { "yes" } else { "no" });
        let _ = writeln!(
            out,
            "  Data model:   {} (short {}, int {}, long {}, long long {})",
            self.data_model, w.short, w.int, w.long, w.long_long
        );
        let _ = writeln!(out, "  C library:    {}", self.c_library);
        out
    }
}

/// Render a platform description in the requested format.
pub fn render(platform: Platform, format: OutputFormat) -> Result<String> {
    let report = PlatformReport::new(platform);
    Ok(match format {
        OutputFormat::Text => format!("=== Platform: {} ===\n{}", report.platform, report.to_text()),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Toml => toml::to_string_pretty(&report)?,
    })
}

/// Classify `os` and `arch` and describe the resulting platform.
pub fn run(os: &str, arch: &str, little_endian: bool, format: OutputFormat) -> Result<()> {
    let platform = Platform::new(
        OperatingSystem::parse(Some(os)),
        Architecture::parse(Some(arch)).with_endianness(little_endian),
    );
    if platform.operating_system == OperatingSystem::Unknown {
        tracing::warn!(os, "operating system not recognized");
    }
    if platform.architecture == Architecture::Unknown {
        tracing::warn!(arch, "architecture not recognized");
    }
    println!("{}", render(platform, format)?);
    Ok(())
}
