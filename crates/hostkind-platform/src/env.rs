//! Environment access.
//!
//! Derivations that depend on environment variables or the home directory
//! read them through [`Environment`], so they can run against a fixed map
//! instead of the real process environment.

use std::collections::HashMap;
use std::path::PathBuf;

/// Read-only view of the process environment.
pub trait Environment {
    /// Value of an environment variable, if set and valid Unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// The current user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home::home_dir()
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
    home: Option<PathBuf>,
}

impl MapEnvironment {
    /// An environment with no variables and no home directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the home directory.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Set an environment variable.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_environment_lookups() {
        let env = MapEnvironment::new()
            .with_home("/home/alice")
            .with_var("XDG_DATA_HOME", "/data");
        assert_eq!(env.var("XDG_DATA_HOME").as_deref(), Some("/data"));
        assert!(env.var("APPDATA").is_none());
        assert_eq!(env.home_dir(), Some(PathBuf::from("/home/alice")));
    }

    #[test]
    fn empty_map_has_no_home() {
        assert!(MapEnvironment::new().home_dir().is_none());
    }

    #[test]
    fn system_environment_reads_process_vars() {
        // PATH is set in every test harness we run under.
        assert!(SystemEnvironment.var("PATH").is_some());
        assert!(SystemEnvironment
            .var("HOSTKIND_SURELY_UNSET_VARIABLE")
            .is_none());
    }
}
