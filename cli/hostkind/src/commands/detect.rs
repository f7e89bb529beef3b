//! `hostkind detect` — the platform this process runs on.

use anyhow::Result;
use hostkind_platform::{HostConfig, HostPlatforms};
use serde::Serialize;

use super::describe::PlatformReport;
use super::OutputFormat;
use crate::settings::ConfigSource;

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct DetectReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    os_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    os_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_arch_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_arch_name: Option<&'a str>,
    translated: bool,
    current: PlatformReport,
    system: PlatformReport,
}

pub fn render(host: &HostPlatforms, source: &ConfigSource, format: OutputFormat) -> Result<String> {
    let report = DetectReport {
        os_name: host.os_name.as_deref(),
        os_version: host.os_version.as_deref(),
        current_arch_name: host.current_arch_name.as_deref(),
        system_arch_name: host.system_arch_name.as_deref(),
        translated: host.is_translated(),
        current: PlatformReport::new(host.current),
        system: PlatformReport::new(host.system),
    };

    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Toml => toml::to_string_pretty(&report)?,
        OutputFormat::Text => {
            let mut out = String::from("=== Host ===\n");
            match source.path() {
                Some(path) => out.push_str(&format!("Config:  {}\n", path.display())),
                None => out.push_str("Config:  (defaults)\n"),
            }
            out.push_str(&format!(
                "OS name: {}\n",
                report.os_name.unwrap_or("(unknown)")
            ));
            if let Some(version) = report.os_version {
                out.push_str(&format!("Version: {version}\n"));
            }
            out.push('\n');
            out.push_str(&format!(
                "--- Current platform: {} (reported as {}) ---\n",
                report.current.platform,
                report.current_arch_name.unwrap_or("?")
            ));
            out.push_str(&report.current.to_text());
            if report.translated {
                out.push('\n');
                out.push_str(&format!(
                    "--- System platform: {} (reported as {}) ---\n",
                    report.system.platform,
                    report.system_arch_name.unwrap_or("?")
                ));
                out.push_str(&report.system.to_text());
            } else {
                out.push_str("\nSystem platform matches the current platform.\n");
            }
            out
        }
    })
}

/// Resolve the process-wide host platforms and print them.
pub fn run(config: &HostConfig, source: &ConfigSource, format: OutputFormat) -> Result<()> {
    let host = hostkind_platform::host::init(config);
    print!("{}", render(host, source, format)?);
    if format != OutputFormat::Text {
        println!();
    }
    Ok(())
}
