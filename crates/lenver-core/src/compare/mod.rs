//! Three-way version comparison.
//!
//! The order is total and checked in strict sequence:
//!
//! 1. `(major, minor, patch)` as integers, an absent patch counting as 0
//! 2. pre-release: a version with one sorts before a version without;
//!    two pre-release tokens are compared segment by segment
//! 3. build: a version with one sorts before a version without;
//!    two build tokens are compared segment by segment
//!
//! Step 3 deliberately differs from semantic versioning, which ignores build
//! metadata. Consumers that pick a dominant version depend on it.

use crate::types::VersionParts;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

const SEGMENT_SEPARATORS: [char; 4] = ['.', ' ', '_', '-'];

/// Compare two sets of version components.
pub fn compare(a: &VersionParts, b: &VersionParts) -> Ordering {
    let base = (a.major, a.minor, a.patch.unwrap_or(0)).cmp(&(b.major, b.minor, b.patch.unwrap_or(0)));
    if base != Ordering::Equal {
        return base;
    }

    let pre_release = qualifier_cmp(a.pre_release.as_deref(), b.pre_release.as_deref());
    if pre_release != Ordering::Equal {
        return pre_release;
    }

    qualifier_cmp(a.build.as_deref(), b.build.as_deref())
}

/// A present qualifier sorts before an absent one
fn qualifier_cmp(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(a), Some(b)) => compare_segments(a, b),
    }
}

/// Compare two qualifier tokens segment by segment.
///
/// Spaces, underscores and hyphens count as dots. The shorter segment list is
/// padded with missing entries, which sort before any segment. Segments
/// compare as plain strings, so `"10"` sorts before `"9"`.
pub fn compare_segments(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);

    for i in 0..left.len().max(right.len()) {
        match left.get(i).cmp(&right.get(i)) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

fn segments(token: &str) -> Vec<&str> {
    token.split(SEGMENT_SEPARATORS).collect()
}

/// Hash components so that values the comparator calls equal hash alike
pub(crate) fn hash_parts<H: Hasher>(parts: &VersionParts, state: &mut H) {
    parts.major.hash(state);
    parts.minor.hash(state);
    parts.patch.unwrap_or(0).hash(state);
    parts.pre_release.as_deref().map(segments).hash(state);
    parts.build.as_deref().map(segments).hash(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse;

    fn v(text: &str) -> VersionParts {
        parse(text).unwrap_or_default()
    }

    #[test]
    fn test_numeric_triple() {
        assert_eq!(compare(&v("1.0.0"), &v("2.0.0")), Ordering::Less);
        assert_eq!(compare(&v("1.10.0"), &v("1.9.0")), Ordering::Greater);
        assert_eq!(compare(&v("1.2.3"), &v("1.2.4")), Ordering::Less);
    }

    #[test]
    fn test_missing_patch_counts_as_zero() {
        assert_eq!(compare(&v("1.2"), &v("1.2.0")), Ordering::Equal);
        assert_eq!(compare(&v("5"), &v("5.0.0")), Ordering::Equal);
        assert_eq!(compare(&v("1.2"), &v("1.2.1")), Ordering::Less);
    }

    #[test]
    fn test_pre_release_sorts_first() {
        assert_eq!(compare(&v("1.0.0-alpha"), &v("1.0.0")), Ordering::Less);
        assert_eq!(compare(&v("1.0.0"), &v("1.0.0-alpha")), Ordering::Greater);
        // pre-release only matters once the numbers tie
        assert_eq!(compare(&v("1.0.1-alpha"), &v("1.0.0")), Ordering::Greater);
    }

    #[test]
    fn test_pre_release_segments() {
        assert_eq!(compare(&v("1.0.0-alpha.1"), &v("1.0.0-alpha.2")), Ordering::Less);
        assert_eq!(compare(&v("1.0.0-alpha"), &v("1.0.0-alpha.1")), Ordering::Less);
        assert_eq!(compare(&v("1.0.0-beta"), &v("1.0.0-alpha.9")), Ordering::Greater);
    }

    // Build metadata lowers precedence: the opposite of semantic versioning.
    #[test]
    fn test_build_sorts_before_no_build() {
        assert_eq!(compare(&v("1.0.0+001"), &v("1.0.0")), Ordering::Less);
        assert_eq!(compare(&v("1.0.0"), &v("1.0.0+001")), Ordering::Greater);
        assert_eq!(compare(&v("1.0.0+001"), &v("1.0.0+002")), Ordering::Less);
    }

    #[test]
    fn test_pre_release_decides_before_build() {
        assert_eq!(compare(&v("1.0.0-rc+5"), &v("1.0.0-rc")), Ordering::Less);
        assert_eq!(compare(&v("1.0.0-rc.2+1"), &v("1.0.0-rc.10")), Ordering::Greater);
        assert_eq!(compare(&v("1.0.0-rc+9"), &v("1.0.0+1")), Ordering::Less);
    }

    #[test]
    fn test_fully_equal() {
        assert_eq!(compare(&v("2.0-rc.1+7"), &v("v2.0.0-rc-1+7")), Ordering::Equal);
        assert_eq!(compare(&v(""), &v("garbage")), Ordering::Equal);
    }

    #[test]
    fn test_segment_separators_are_equivalent() {
        assert_eq!(compare_segments("alpha-1", "alpha.1"), Ordering::Equal);
        assert_eq!(compare_segments("alpha_1", "alpha 1"), Ordering::Equal);
    }

    #[test]
    fn test_segments_are_plain_strings() {
        assert_eq!(compare_segments("rc.10", "rc.9"), Ordering::Less);
        assert_eq!(compare_segments("Beta", "alpha"), Ordering::Less);
    }

    #[test]
    fn test_missing_segment_sorts_first() {
        assert_eq!(compare_segments("alpha", "alpha.1"), Ordering::Less);
        assert_eq!(compare_segments("alpha.", "alpha"), Ordering::Greater);
        assert_eq!(compare_segments("alpha.", "alpha.a"), Ordering::Less);
    }

    #[test]
    fn test_hash_follows_equality() {
        use std::collections::hash_map::DefaultHasher;

        fn digest(parts: &VersionParts) -> u64 {
            let mut hasher = DefaultHasher::new();
            hash_parts(parts, &mut hasher);
            hasher.finish()
        }

        assert_eq!(digest(&v("1.2")), digest(&v("1.2.0")));
        assert_eq!(digest(&v("1.0-rc_1")), digest(&v("1.0-rc.1")));
        assert_ne!(digest(&v("1.0")), digest(&v("1.0+1")));
    }
}
