//! Configuration parsing for lenver
//!
//! This crate handles parsing and validation of lenver.toml files and layers
//! them with environment and command-line overrides into the effective
//! `Settings` used by the CLI.

pub mod merge;
pub mod toml;

// Re-export main types
pub use merge::{ConfigLayering, ConfigLoader, ConfigSource, Settings};
pub use self::toml::{BrandsSection, LenverToml, LogSection, OutputFormat, OutputSection};

use lenver_core::error::LenverError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, LenverError>;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "lenver.toml";
