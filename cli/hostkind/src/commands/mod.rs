//! CLI command implementations.

pub mod classify;
pub mod config;
pub mod data_dir;
pub mod describe;
pub mod detect;

use clap::ValueEnum;

/// How a command prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    Json,
    Toml,
}
