//! `hostkind config` — write and check `hostkind.toml`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use hostkind_platform::config::{
    config_to_toml, generate_template, parse_config, validate_config, Severity, CONFIG_FILE_NAME,
};
use hostkind_platform::HostConfig;

/// Write a default `hostkind.toml` into `dir`.
pub fn init(dir: &Path) -> Result<()> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }
    let content = generate_template().context("generating config template")?;
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

/// Check a config file and report every issue. Fails if any issue is an
/// error.
pub fn validate(path: &Path) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = parse_config(&content).with_context(|| format!("parsing {}", path.display()))?;

    match validate_config(&config) {
        Ok(()) => {
            println!("{}: ok", path.display());
            Ok(())
        }
        Err(issues) => {
            let mut errors = 0;
            for issue in &issues {
                let label = match issue.severity {
                    Severity::Error => {
                        errors += 1;
                        "error"
                    }
                    Severity::Warning => "warning",
                };
                println!("{}: {label}: {}", path.display(), issue.message);
            }
            if errors > 0 {
                bail!("{errors} error(s) in {}", path.display());
            }
            Ok(())
        }
    }
}

/// Print the effective configuration.
pub fn show(config: &HostConfig) -> Result<()> {
    print!("{}", config_to_toml(config)?);
    Ok(())
}
