//! Core version types.
//!
//! This module provides:
//! - `VersionParts`: the five extracted components of a version
//! - `Version`: a mutable version value with fluent setters
//! - `FrozenVersion`: a read-only version value, safe to share across threads
//! - `Versioned`: the accessors and relational predicates both variants share

pub mod parts;
pub mod version;

// Re-export all public types
pub use parts::{ComponentError, VersionParts};
pub use version::{FrozenVersion, Version, Versioned};
