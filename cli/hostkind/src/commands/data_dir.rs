//! `hostkind data-dir` — where an application should keep its data.

use std::path::PathBuf;

use anyhow::Result;
use hostkind_platform::{Environment, OperatingSystem, Platform, SystemEnvironment};

/// Application data directory for `folder` on `platform`, or on the
/// current host when `os` names no override.
pub fn resolve(folder: &str, os: Option<&str>, current: Platform, env: &impl Environment) -> PathBuf {
    let platform = match os {
        Some(raw) => Platform::new(OperatingSystem::parse(Some(raw)), current.architecture),
        None => current,
    };
    platform.app_data_dir(folder, env)
}

pub fn run(folder: &str, os: Option<&str>) -> Result<()> {
    let current = hostkind_platform::host::current_platform();
    let dir = resolve(folder, os, current, &SystemEnvironment);
    println!("{}", dir.display());
    Ok(())
}
