//! `Sec-CH-UA` and `Sec-CH-UA-Full-Version-List` header values.
//!
//! Both headers carry a brand list in the structured form
//! `"Chromium";v="120", "Google Chrome";v="120", "Not_A Brand";v="8"`.
//! The low entropy header reports a major version per brand, the full
//! version list reports complete versions.

use crate::brand::UserAgentBrand;
use crate::tally::VersionTally;
use lenver_core::{FrozenVersion, Versioned};
use serde::Serialize;
use tracing::debug;

/// Brand names trusted to report a real browser version
pub const KNOWN_BRANDS: [&str; 7] = ["Chrome", "Chromium", "Edge", "Edg", "Firefox", "Safari", "Opera"];

/// Which client hint header a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HintKind {
    /// `Sec-CH-UA`
    Brands,
    /// `Sec-CH-UA-Full-Version-List`
    FullVersionList,
}

impl HintKind {
    pub fn header_name(&self) -> &'static str {
        match self {
            HintKind::Brands => "Sec-CH-UA",
            HintKind::FullVersionList => "Sec-CH-UA-Full-Version-List",
        }
    }
}

/// A parsed client hint header value
#[derive(Debug, Clone)]
pub struct ClientHints {
    kind: HintKind,
    value: String,
    brands: Vec<UserAgentBrand>,
    known: Vec<String>,
}

impl ClientHints {
    /// Parse a header value of the given kind
    pub fn new(kind: HintKind, value: impl Into<String>) -> Self {
        let value = value.into();
        let brands = parse_brand_pairs(&value)
            .into_iter()
            .map(|(name, version)| match kind {
                HintKind::Brands => UserAgentBrand::new(name, version),
                // full versions are normalized through their rendered form
                HintKind::FullVersionList => {
                    UserAgentBrand::new(name, FrozenVersion::parse(version).render())
                },
            })
            .collect();

        Self {
            kind,
            value,
            brands,
            known: KNOWN_BRANDS.iter().map(|b| b.to_string()).collect(),
        }
    }

    /// Parse a `Sec-CH-UA` value
    pub fn brands_header(value: impl Into<String>) -> Self {
        Self::new(HintKind::Brands, value)
    }

    /// Parse a `Sec-CH-UA-Full-Version-List` value
    pub fn full_version_list(value: impl Into<String>) -> Self {
        Self::new(HintKind::FullVersionList, value)
    }

    /// Replace the brand names trusted by the dominant version fallback
    pub fn with_known_brands<I, S>(mut self, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known = known.into_iter().map(Into::into).collect();
        self
    }

    pub fn kind(&self) -> HintKind {
        self.kind
    }

    /// The header value as received
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn brands(&self) -> &[UserAgentBrand] {
        &self.brands
    }

    pub fn known_brands(&self) -> &[String] {
        &self.known
    }

    /// Check whether any brand carries the given name (case-insensitive)
    pub fn is_brand_name(&self, name: &str) -> bool {
        self.brands.iter().any(|brand| brand.is_name(name))
    }

    /// The version most brands agree on.
    ///
    /// Falls back to the version of the first brand listed in the known
    /// brands when no version repeats.
    pub fn dominant_version(&self) -> Option<FrozenVersion> {
        if self.brands.is_empty() {
            return None;
        }

        let tally: VersionTally = self.brands.iter().map(|b| b.version().render()).collect();
        if let Some(common) = tally.dominant() {
            return Some(FrozenVersion::parse(common));
        }

        let known = self
            .brands
            .iter()
            .find(|brand| self.known.iter().any(|name| name == brand.name()));
        match known {
            Some(brand) => {
                debug!(brand = brand.name(), "no repeated version, using known brand");
                Some(brand.version().clone())
            },
            None => {
                debug!(header = self.kind.header_name(), "no repeated version and no known brand");
                None
            },
        }
    }

    /// Major number of the dominant version
    pub fn major_version(&self) -> Option<u64> {
        self.dominant_version().map(|v| v.major())
    }
}

/// Extract `(brand, version)` pairs from a structured brand list.
///
/// A pair is a run of non-quote characters followed by `";`, an optional
/// whitespace character, `v="`, a non-empty version and a closing quote,
/// optionally followed by a comma. Brand names are trimmed.
pub fn parse_brand_pairs(value: &str) -> Vec<(&str, &str)> {
    let bytes = value.as_bytes();
    let mut pairs = Vec::new();
    let mut at = 0;

    while at < bytes.len() {
        if bytes[at] == b'"' {
            at += 1;
            continue;
        }

        let brand_end = at + bytes[at..].iter().take_while(|b| **b != b'"').count();
        match version_tail(bytes, brand_end) {
            Some((version_start, version_end, next)) => {
                pairs.push((value[at..brand_end].trim(), &value[version_start..version_end]));
                at = next;
            },
            None => at = brand_end,
        }
    }

    pairs
}

/// Match `";` `\s?` `v="` VERSION `"` `,?` at `at`, returning the version
/// span and the position after the match
fn version_tail(bytes: &[u8], at: usize) -> Option<(usize, usize, usize)> {
    const OPEN: &[u8] = b"v=\"";

    if !bytes[at..].starts_with(b"\";") {
        return None;
    }
    let mut pos = at + 2;

    if bytes.get(pos).map_or(false, u8::is_ascii_whitespace) && bytes[pos + 1..].starts_with(OPEN) {
        pos += 1;
    }
    if !bytes[pos..].starts_with(OPEN) {
        return None;
    }
    pos += OPEN.len();

    let version_end = pos + bytes[pos..].iter().take_while(|b| **b != b'"').count();
    if version_end == pos || version_end == bytes.len() {
        return None;
    }

    let mut next = version_end + 1;
    if bytes.get(next) == Some(&b',') {
        next += 1;
    }

    Some((pos, version_end, next))
}
