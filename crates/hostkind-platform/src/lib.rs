//! Host platform classification.
//!
//! Turns the raw, inconsistent strings a process sees about its host
//! (`"amd64"`, `"Mac OS X"`, `"powerpc64"`, ...) into canonical values:
//! - **Architecture:** CPU family, with bit width
//! - **Operating system:** kernel/vendor family, with a base-OS hierarchy
//! - **Data model:** primitive integer widths (ILP32, LLP64, LP64)
//!
//! A [`Platform`] pairs an operating system with an architecture and derives
//! conventions from the pair (C library name, application data directory).
//! The [`host`] module resolves the platform the process runs on, once, and
//! hands it out through explicit accessors.

pub mod arch;
pub mod config;
pub mod data_model;
pub mod env;
pub mod error;
pub mod host;
pub mod os;
pub mod platform;
pub mod probe;

pub use arch::Architecture;
pub use config::HostConfig;
pub use data_model::{DataModel, TypeWidths};
pub use env::{Environment, MapEnvironment, SystemEnvironment};
pub use error::{PlatformError, Result};
pub use host::{HostPlatforms, RawHost};
pub use os::OperatingSystem;
pub use platform::Platform;
