//! Version values with rkyv and serde support.
//!
//! A version keeps the text it was parsed from next to its components. Two
//! variants share one implementation through [`Versioned`]:
//! - [`Version`] can be changed in place with fluent setters
//! - [`FrozenVersion`] cannot change after construction and can be shared
//!   freely between threads
//!
//! Equality, ordering and hashing follow [`crate::compare::compare`]; the raw
//! text never takes part in them.

use crate::compare::{compare, hash_parts};
use crate::grammar;
use crate::types::parts::{token, ComponentError, VersionParts};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Accessors and relational predicates shared by both version variants
pub trait Versioned {
    /// Parsed (or directly supplied) components
    fn parts(&self) -> &VersionParts;

    /// The text this version was created from
    fn raw(&self) -> &str;

    /// Owned copy of the components
    fn to_parts(&self) -> VersionParts {
        self.parts().clone()
    }

    fn major(&self) -> u64 {
        self.parts().major
    }

    fn minor(&self) -> u64 {
        self.parts().minor
    }

    fn patch(&self) -> Option<u64> {
        self.parts().patch
    }

    fn pre_release(&self) -> Option<&str> {
        self.parts().pre_release.as_deref()
    }

    fn build(&self) -> Option<&str> {
        self.parts().build.as_deref()
    }

    /// Check if this is a pre-release version
    fn is_pre_release(&self) -> bool {
        self.parts().is_pre_release()
    }

    /// Render as `MAJOR.MINOR[.PATCH][-PRE][+BUILD]`.
    ///
    /// Falls back to the raw text if formatting fails.
    fn render(&self) -> String {
        let mut out = String::new();
        match write!(out, "{}", self.parts()) {
            Ok(()) => out,
            Err(_) => self.raw().to_string(),
        }
    }

    /// Three-way comparison against any other version value
    fn compare_to<V: Versioned + ?Sized>(&self, other: &V) -> Ordering {
        compare(self.parts(), other.parts())
    }

    fn newer_than<V: Versioned + ?Sized>(&self, other: &V) -> bool {
        self.compare_to(other) == Ordering::Greater
    }

    fn older_than<V: Versioned + ?Sized>(&self, other: &V) -> bool {
        self.compare_to(other) == Ordering::Less
    }

    fn same_as<V: Versioned + ?Sized>(&self, other: &V) -> bool {
        self.compare_to(other) == Ordering::Equal
    }

    fn differs_from<V: Versioned + ?Sized>(&self, other: &V) -> bool {
        self.compare_to(other) != Ordering::Equal
    }

    fn at_least<V: Versioned + ?Sized>(&self, other: &V) -> bool {
        self.compare_to(other) != Ordering::Less
    }

    fn at_most<V: Versioned + ?Sized>(&self, other: &V) -> bool {
        self.compare_to(other) != Ordering::Greater
    }
}

/// Mutable version value
#[derive(
    Debug, Clone, Default, Archive, Deserialize, Serialize, SerdeDeserialize, SerdeSerialize,
)]
#[archive(check_bytes)]
pub struct Version {
    raw: String,
    #[serde(flatten)]
    parts: VersionParts,
}

/// Read-only version value
#[derive(
    Debug, Clone, Default, Archive, Deserialize, Serialize, SerdeDeserialize, SerdeSerialize,
)]
#[archive(check_bytes)]
pub struct FrozenVersion {
    raw: String,
    #[serde(flatten)]
    parts: VersionParts,
}

impl Version {
    /// Parse version text. Never fails: unrecognized text yields `0.0`.
    pub fn parse(text: impl AsRef<str>) -> Self {
        let raw = text.as_ref();
        Self {
            raw: raw.to_string(),
            parts: grammar::parse(raw).unwrap_or_default(),
        }
    }

    /// Parse the string form of any displayable value
    pub fn from_display(value: &impl fmt::Display) -> Self {
        Self::parse(value.to_string())
    }

    /// Create a version from components, bypassing the grammar
    pub fn from_parts(parts: VersionParts) -> Self {
        Self {
            raw: parts.to_string(),
            parts,
        }
    }

    /// Create a version from explicit component values
    pub fn from_components(
        major: u64,
        minor: u64,
        patch: Option<u64>,
        pre_release: Option<&str>,
        build: Option<&str>,
    ) -> Self {
        Self::from_parts(VersionParts::from_components(
            major,
            minor,
            patch,
            pre_release,
            build,
        ))
    }

    /// Create a version from a JSON object or array of components
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ComponentError> {
        VersionParts::from_value(value).map(Self::from_parts)
    }

    pub fn set_major(&mut self, major: u64) -> &mut Self {
        self.parts.major = major;
        self
    }

    pub fn set_minor(&mut self, minor: u64) -> &mut Self {
        self.parts.minor = minor;
        self
    }

    pub fn set_patch(&mut self, patch: Option<u64>) -> &mut Self {
        self.parts.patch = patch;
        self
    }

    /// Set the pre-release token verbatim (an empty token clears it)
    pub fn set_pre_release(&mut self, pre_release: Option<&str>) -> &mut Self {
        self.parts.pre_release = token(pre_release);
        self
    }

    /// Set the build token verbatim (an empty token clears it)
    pub fn set_build(&mut self, build: Option<&str>) -> &mut Self {
        self.parts.build = token(build);
        self
    }

    /// Convert into a read-only version
    pub fn freeze(self) -> FrozenVersion {
        FrozenVersion {
            raw: self.raw,
            parts: self.parts,
        }
    }
}

impl FrozenVersion {
    /// Parse version text. Never fails: unrecognized text yields `0.0`.
    pub fn parse(text: impl AsRef<str>) -> Self {
        Version::parse(text).freeze()
    }

    /// Parse the string form of any displayable value
    pub fn from_display(value: &impl fmt::Display) -> Self {
        Version::from_display(value).freeze()
    }

    /// Create a version from components, bypassing the grammar
    pub fn from_parts(parts: VersionParts) -> Self {
        Version::from_parts(parts).freeze()
    }

    /// Create a version from explicit component values
    pub fn from_components(
        major: u64,
        minor: u64,
        patch: Option<u64>,
        pre_release: Option<&str>,
        build: Option<&str>,
    ) -> Self {
        Version::from_components(major, minor, patch, pre_release, build).freeze()
    }

    /// Create a version from a JSON object or array of components
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ComponentError> {
        Version::from_value(value).map(Version::freeze)
    }
}

impl Versioned for Version {
    fn parts(&self) -> &VersionParts {
        &self.parts
    }

    fn raw(&self) -> &str {
        &self.raw
    }
}

impl Versioned for FrozenVersion {
    fn parts(&self) -> &VersionParts {
        &self.parts
    }

    fn raw(&self) -> &str {
        &self.raw
    }
}

impl From<Version> for FrozenVersion {
    fn from(version: Version) -> Self {
        version.freeze()
    }
}

impl From<FrozenVersion> for Version {
    fn from(version: FrozenVersion) -> Self {
        Self {
            raw: version.raw,
            parts: version.parts,
        }
    }
}

impl From<&str> for Version {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for Version {
    fn from(text: String) -> Self {
        Self::parse(text)
    }
}

impl From<&str> for FrozenVersion {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for FrozenVersion {
    fn from(text: String) -> Self {
        Self::parse(text)
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl FromStr for FrozenVersion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Display for FrozenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_parts(&self.parts, state);
    }
}

impl PartialEq for FrozenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for FrozenVersion {}

impl PartialOrd for FrozenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrozenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl Hash for FrozenVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_parts(&self.parts, state);
    }
}

impl PartialEq<FrozenVersion> for Version {
    fn eq(&self, other: &FrozenVersion) -> bool {
        self.same_as(other)
    }
}

impl PartialEq<Version> for FrozenVersion {
    fn eq(&self, other: &Version) -> bool {
        self.same_as(other)
    }
}

impl PartialOrd<FrozenVersion> for Version {
    fn partial_cmp(&self, other: &FrozenVersion) -> Option<Ordering> {
        Some(self.compare_to(other))
    }
}

impl PartialOrd<Version> for FrozenVersion {
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        Some(self.compare_to(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_parsing() {
        let v = Version::parse("1.2.3");
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 2);
        assert_eq!(v.patch(), Some(3));
        assert_eq!(v.pre_release(), None);
        assert_eq!(v.build(), None);
        assert_eq!(v.raw(), "1.2.3");
    }

    #[test]
    fn test_defaulting() {
        let v = Version::parse("5");
        assert_eq!(v.major(), 5);
        assert_eq!(v.minor(), 0);
        assert_eq!(v.patch(), None);
        assert_eq!(v.to_string(), "5.0");
    }

    #[test]
    fn test_build_fallback() {
        let v = FrozenVersion::parse("Build 12345");
        assert_eq!(v.major(), 0);
        assert_eq!(v.minor(), 0);
        assert_eq!(v.patch(), None);
        assert_eq!(v.pre_release(), None);
        assert_eq!(v.build(), Some("12345"));
    }

    #[test]
    fn test_unstructured_input_is_empty_version() {
        for text in ["", "   ", "not a version", "\u{0}\u{1}", "..--++"] {
            let v = Version::parse(text);
            assert_eq!(v.major(), 0);
            assert_eq!(v.minor(), 0);
            assert_eq!(v.patch(), None);
            assert_eq!(v.pre_release(), None);
            assert_eq!(v.build(), None);
            assert_eq!(v.raw(), text);
            assert_eq!(v.to_string(), "0.0");
        }
    }

    #[test]
    fn test_is_pre_release() {
        assert!(Version::parse("1.0.0-alpha").is_pre_release());
        assert!(!Version::parse("1.0.0+001").is_pre_release());
        assert!(!Version::parse("1.0.0").is_pre_release());
    }

    #[test]
    fn test_render_is_canonical() {
        assert_eq!(Version::parse("v1.02.003").to_string(), "1.2.3");
        assert_eq!(Version::parse("Version 2.1 beta 4").to_string(), "2.1-beta+4");
        assert_eq!(Version::parse("1.2.0").to_string(), "1.2.0");
    }

    #[test]
    fn test_raw_is_kept_verbatim() {
        let v = Version::parse("  v1.0 ");
        assert_eq!(v.raw(), "  v1.0 ");
        assert_eq!(v.render(), "1.0");
    }

    #[test]
    fn test_from_components_bypasses_grammar() {
        let v = Version::from_components(1, 2, None, Some("weird token+x"), Some("a b"));
        assert_eq!(v.pre_release(), Some("weird token+x"));
        assert_eq!(v.build(), Some("a b"));
        assert_eq!(v.to_string(), "1.2-weird token+x+a b");
        assert_eq!(v.raw(), "1.2-weird token+x+a b");
    }

    #[test]
    fn test_from_value() {
        let v = Version::from_value(&json!({"major": 4, "minor": 1, "build": "x"})).unwrap();
        assert_eq!(v.to_string(), "4.1+x");

        let err = FrozenVersion::from_value(&json!(true)).unwrap_err();
        assert!(matches!(err, ComponentError::NotAContainer { .. }));
    }

    #[test]
    fn test_fluent_setters() {
        let mut v = Version::parse("1.0");
        v.set_major(2)
            .set_minor(5)
            .set_patch(Some(1))
            .set_pre_release(Some("rc.1"))
            .set_build(Some("99"));

        assert_eq!(v.to_string(), "2.5.1-rc.1+99");
        assert_eq!(v.raw(), "1.0");

        v.set_pre_release(None).set_build(Some(""));
        assert_eq!(v.to_string(), "2.5.1");
    }

    #[test]
    fn test_setter_tokens_are_not_reparsed() {
        let mut v = Version::parse("1.0");
        v.set_pre_release(Some("alpha beta"));
        assert_eq!(v.pre_release(), Some("alpha beta"));
        assert_eq!(v.build(), None);
    }

    #[test]
    fn test_freeze_and_thaw() {
        let mut v = Version::parse("3.1-rc");
        v.set_patch(Some(4));

        let frozen = v.clone().freeze();
        assert_eq!(frozen.to_string(), "3.1.4-rc");
        assert_eq!(frozen.raw(), "3.1-rc");
        assert_eq!(frozen, v);

        let thawed = Version::from(frozen);
        assert_eq!(thawed.to_string(), "3.1.4-rc");
    }

    #[test]
    fn test_conversions() {
        let v: Version = "1.4".parse().unwrap();
        assert_eq!(v, Version::from("1.4.0"));

        let f: FrozenVersion = String::from("2.0").into();
        assert_eq!(f.major(), 2);

        assert_eq!(Version::from_display(&42).to_string(), "42.0");
        assert_eq!(f.to_parts(), VersionParts::new(2, 0));
    }

    #[test]
    fn test_relational_predicates() {
        let low = Version::parse("1.0.0-alpha");
        let high = FrozenVersion::parse("1.0.0");

        assert!(high.newer_than(&low));
        assert!(low.older_than(&high));
        assert!(low.differs_from(&high));
        assert!(!low.same_as(&high));
        assert!(high.at_least(&low));
        assert!(low.at_most(&high));
        assert!(high.at_least(&high));
        assert!(high.at_most(&high));
        assert!(low < high);
        assert!(high > low);
    }

    #[test]
    fn test_pre_release_precedence() {
        assert!(Version::parse("1.0.0-alpha") < Version::parse("1.0.0"));
        assert!(Version::parse("1.0.0") > Version::parse("1.0.0-alpha"));
    }

    // Deliberate: a build token lowers precedence instead of being ignored.
    #[test]
    fn test_build_precedence_is_inverted() {
        assert!(Version::parse("1.0.0+001") < Version::parse("1.0.0"));
        assert!(Version::parse("1.0.0+001").older_than(&Version::parse("1.0.0")));
    }

    #[test]
    fn test_segment_precedence() {
        assert!(Version::parse("1.0.0-alpha.1") < Version::parse("1.0.0-alpha.2"));
        assert!(Version::parse("1.0.0-alpha") < Version::parse("1.0.0-alpha.1"));
    }

    #[test]
    fn test_equal_ignores_raw() {
        let a = Version::parse("v1.2");
        let b = Version::parse("1.2.0");
        assert_ne!(a.raw(), b.raw());
        assert_eq!(a, b);
        assert!(a.same_as(&b));
    }

    #[test]
    fn test_sorting() {
        let mut versions: Vec<Version> = ["1.0.0", "1.0.0-beta", "0.9", "1.0.0+7", "1.0.0-alpha", "2"]
            .iter()
            .map(|s| Version::parse(s))
            .collect();
        versions.sort();

        let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["0.9", "1.0.0-alpha", "1.0.0-beta", "1.0.0+7", "1.0.0", "2.0"]
        );
    }

    #[test]
    fn test_hash_set_dedups_equal_versions() {
        use std::collections::HashSet;

        let set: HashSet<FrozenVersion> = ["1.2", "1.2.0", "v1.2.0", "1.2.1"]
            .iter()
            .map(|s| FrozenVersion::parse(s))
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_frozen_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrozenVersion>();

        let shared = std::sync::Arc::new(FrozenVersion::parse("7.1"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let v = std::sync::Arc::clone(&shared);
                std::thread::spawn(move || v.to_string())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "7.1");
        }
    }

    #[test]
    fn test_serde_json_shape() {
        let v = Version::parse("v1.2-rc");
        let value = serde_json::to_value(&v).unwrap();
        assert_eq!(
            value,
            json!({
                "raw": "v1.2-rc",
                "major": 1,
                "minor": 2,
                "patch": null,
                "pre_release": "rc",
                "build": null,
            })
        );

        let back: Version = serde_json::from_value(value).unwrap();
        assert_eq!(back, v);
        assert_eq!(back.raw(), "v1.2-rc");
    }

    #[test]
    fn test_rkyv_serialization() {
        use rkyv::Deserialize;

        let version = Version::parse("1.2.3-beta+5");

        let bytes = rkyv::to_bytes::<_, 256>(&version).unwrap();
        let archived = rkyv::check_archived_root::<Version>(&bytes[..]).unwrap();
        let deserialized: Version = archived.deserialize(&mut rkyv::Infallible).unwrap();

        assert_eq!(version, deserialized);
        assert_eq!(deserialized.raw(), "1.2.3-beta+5");
    }
}
