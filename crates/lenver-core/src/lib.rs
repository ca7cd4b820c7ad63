//! # lenver-core
//!
//! Forgiving version parsing and ordering shared across all lenver crates.
//!
//! This crate provides:
//! - A lenient grammar that pulls major/minor/patch/pre-release/build out of
//!   loosely formatted version text without ever failing
//! - `Version` (mutable) and `FrozenVersion` (read-only) value types
//! - A total-order comparator with an explicit pre-release and build tie-break
//! - LenverError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `grammar`: the version text scanner
//! - `compare`: the three-way comparator and segment comparison
//! - `types`: version components and the two version variants
//! - `error`: error types and result aliases

pub mod compare;
pub mod error;
pub mod grammar;
pub mod types;

// Re-export commonly used types
pub use compare::{compare, compare_segments};
pub use error::{LenverError, LenverResult};
pub use types::{ComponentError, FrozenVersion, Version, VersionParts, Versioned};
