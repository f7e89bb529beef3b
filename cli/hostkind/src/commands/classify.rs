//! `hostkind arch`, `hostkind os`, `hostkind list` — raw string classification.

use anyhow::Result;
use hostkind_platform::{Architecture, OperatingSystem};
use serde::Serialize;

use super::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct ArchClassification<'a> {
    input: &'a str,
    architecture: Architecture,
    display_name: &'static str,
    is_64_bit: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct OsClassification<'a> {
    input: &'a str,
    operating_system: OperatingSystem,
    display_name: &'static str,
    base_chain: Vec<OperatingSystem>,
    unix_like: bool,
}

pub fn render_arch(raw: &str, little_endian: bool, format: OutputFormat) -> Result<String> {
    let arch = Architecture::parse(Some(raw)).with_endianness(little_endian);
    let report = ArchClassification {
        input: raw,
        architecture: arch,
        display_name: arch.display_name(),
        is_64_bit: arch.is_64_bit(),
    };
    Ok(match format {
        OutputFormat::Text => format!(
            "{raw:?} -> {} ({}, {}-bit)",
            arch,
            arch.display_name(),
            arch.word_size()
        ),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Toml => toml::to_string_pretty(&report)?,
    })
}

pub fn render_os(raw: &str, runtime: Option<&str>, format: OutputFormat) -> Result<String> {
    let os = OperatingSystem::parse(Some(raw)).with_runtime(runtime);
    let report = OsClassification {
        input: raw,
        operating_system: os,
        display_name: os.display_name(),
        base_chain: os.ancestors().collect(),
        unix_like: os.is_unix_like(),
    };
    Ok(match format {
        OutputFormat::Text => {
            let mut chain = vec![os.display_name()];
            chain.extend(os.ancestors().map(|a| a.display_name()));
            format!("{raw:?} -> {os} ({})", chain.join(" < "))
        }
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Toml => toml::to_string_pretty(&report)?,
    })
}

/// Classify a raw architecture name.
pub fn arch(raw: &str, little_endian: bool, format: OutputFormat) -> Result<()> {
    println!("{}", render_arch(raw, little_endian, format)?);
    Ok(())
}

/// Classify a raw operating system name.
pub fn os(raw: &str, runtime: Option<&str>, format: OutputFormat) -> Result<()> {
    println!("{}", render_os(raw, runtime, format)?);
    Ok(())
}

/// Table of every canonical architecture and operating system.
pub fn render_list() -> String {
    let mut out = String::from("Architectures:\n");
    for arch in Architecture::ALL {
        out.push_str(&format!(
            "  {:<14} {:<28} {}-bit\n",
            arch.normalized_name(),
            arch.display_name(),
            arch.word_size()
        ));
    }
    out.push_str("\nOperating systems:\n");
    for os in OperatingSystem::ALL {
        let base = os.base().map_or("-", |b| b.normalized_name());
        out.push_str(&format!(
            "  {:<14} {:<16} base: {}\n",
            os.normalized_name(),
            os.display_name(),
            base
        ));
    }
    out
}

/// List all canonical values.
pub fn list() -> Result<()> {
    print!("{}", render_list());
    Ok(())
}
