//! Lenient version grammar.
//!
//! Scans loosely formatted version text such as `v1.2`, `Version 10.15.7`,
//! `2.0.0-rc.1+build.5` or `Build 19H2` into [`VersionParts`]. The scan runs
//! in three stages and never fails:
//!
//! 1. strip surrounding whitespace and a leading `version` word
//! 2. the primary pattern: `[vV]? MAJOR [.MINOR [.PATCH]] REMAINDER`, with
//!    the remainder scanned for a pre-release and a build qualifier
//! 3. the fallback pattern: `Build <token>` anywhere in the text
//!
//! When neither pattern matches, [`parse`] returns `None` and callers fall
//! back to all-default components.

use crate::types::parts::token;
use crate::types::VersionParts;
use tracing::trace;

const PREFIX_WORD: &str = "version";
const FALLBACK_WORD: &str = "Build";

/// Extract version components from arbitrary text.
///
/// Returns `None` when no structured version information is present.
pub fn parse(input: &str) -> Option<VersionParts> {
    let text = strip_prefix_word(input.trim());

    if let Some(parts) = scan_primary(text) {
        return Some(parts);
    }

    if let Some(parts) = scan_build_fallback(text) {
        trace!(input, "matched build-only fallback");
        return Some(parts);
    }

    trace!(input, "no version structure recognized");
    None
}

/// Whitespace as understood by the grammar (space, \t, \n, \x0B, \x0C, \r)
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

fn is_pre_release_lead(byte: u8) -> bool {
    byte == b'.' || byte == b'-' || is_space(byte)
}

fn is_build_lead(byte: u8) -> bool {
    byte == b'+' || is_space(byte)
}

/// Drop a leading `version` word and the single character after it
fn strip_prefix_word(text: &str) -> &str {
    match text.get(..PREFIX_WORD.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX_WORD) => {
            let mut rest = text[PREFIX_WORD.len()..].chars();
            rest.next();
            rest.as_str()
        },
        _ => text,
    }
}

/// Parse an ASCII digit run, saturating at `u64::MAX`
pub(crate) fn parse_digits(digits: &str) -> u64 {
    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

/// End of the digit run starting at `start`
fn digit_run(bytes: &[u8], start: usize) -> usize {
    start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// End of a `.DIGITS` run at `pos`, if one is there
fn dotted_run(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'.') {
        return None;
    }

    let end = digit_run(bytes, pos + 1);
    (end > pos + 1).then_some(end)
}

fn scan_primary(text: &str) -> Option<VersionParts> {
    let bytes = text.as_bytes();
    let start = match bytes.first() {
        Some(b'v' | b'V') => 1,
        _ => 0,
    };

    let major_end = digit_run(bytes, start);
    if major_end == start {
        return None;
    }

    let mut parts = VersionParts::new(parse_digits(&text[start..major_end]), 0);
    let mut pos = major_end;

    if let Some(end) = dotted_run(bytes, pos) {
        parts.minor = parse_digits(&text[pos + 1..end]);
        pos = end;

        if let Some(end) = dotted_run(bytes, pos) {
            parts.patch = Some(parse_digits(&text[pos + 1..end]));
            pos = end;
        }
    }

    let remainder = &text[pos..];
    if !remainder.is_empty() {
        let (pre_release, build) = scan_qualifiers(remainder);
        parts.pre_release = token(pre_release);
        parts.build = token(build);
    }

    Some(parts)
}

/// Find the leftmost qualifier match in the text following the numbers.
///
/// At each position, in order of preference:
/// - a pre-release lead, a token up to the next whitespace or `+`, then
///   either the end of text or a build lead followed by the build
/// - a build lead followed by at least one character of build
///
/// Reaching the end of text without a match yields no qualifiers.
fn scan_qualifiers(rest: &str) -> (Option<&str>, Option<&str>) {
    let bytes = rest.as_bytes();
    let len = bytes.len();

    for at in 0..len {
        let lead = bytes[at];

        if is_pre_release_lead(lead) {
            let token_start = at + 1;
            let token_end = token_start
                + bytes[token_start..]
                    .iter()
                    .take_while(|b| !is_space(**b) && **b != b'+')
                    .count();

            if token_end > token_start {
                let pre_release = &rest[token_start..token_end];
                if token_end == len {
                    return (Some(pre_release), None);
                }
                // bytes[token_end] is a build lead here
                if token_end + 1 < len {
                    return (Some(pre_release), Some(&rest[token_end + 1..]));
                }
            }
        }

        if is_build_lead(lead) && at + 1 < len {
            return (None, Some(&rest[at + 1..]));
        }
    }

    (None, None)
}

fn scan_build_fallback(text: &str) -> Option<VersionParts> {
    let mut from = 0;

    while let Some(found) = text[from..].find(FALLBACK_WORD) {
        let after = from + found + FALLBACK_WORD.len();

        match text.as_bytes().get(after) {
            Some(b) if is_space(*b) => {
                return Some(VersionParts {
                    build: token(Some(&text[after + 1..])),
                    ..VersionParts::default()
                });
            },
            _ => from = after,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(input: &str) -> VersionParts {
        parse(input).unwrap_or_else(|| panic!("expected components for {:?}", input))
    }

    #[test]
    fn test_full_version() {
        let p = parts("1.2.3-alpha.1+build.5");
        assert_eq!(p.major, 1);
        assert_eq!(p.minor, 2);
        assert_eq!(p.patch, Some(3));
        assert_eq!(p.pre_release.as_deref(), Some("alpha.1"));
        assert_eq!(p.build.as_deref(), Some("build.5"));
    }

    #[test]
    fn test_major_only_defaults() {
        let p = parts("5");
        assert_eq!(p, VersionParts::new(5, 0));
        assert_eq!(p.patch, None);
    }

    #[test]
    fn test_major_minor() {
        let p = parts("10.15");
        assert_eq!((p.major, p.minor, p.patch), (10, 15, None));
    }

    #[test]
    fn test_v_prefix() {
        assert_eq!(parts("v2.4.1"), VersionParts::from_components(2, 4, Some(1), None, None));
        assert_eq!(parts("V3"), VersionParts::new(3, 0));
        assert_eq!(parse("vx1"), None);
        assert_eq!(parse("V"), None);
    }

    #[test]
    fn test_version_word_prefix() {
        assert_eq!(parts("Version 14.1.2"), VersionParts::from_components(14, 1, Some(2), None, None));
        assert_eq!(parts("  version 8.0  "), VersionParts::new(8, 0));
        assert_eq!(parts("VERSION v1.1"), VersionParts::new(1, 1));
    }

    #[test]
    fn test_version_word_consumes_one_character() {
        assert_eq!(parse("version9"), None);
        assert_eq!(parse("Version  8.0"), None);
        assert_eq!(parts("versionX1"), VersionParts::new(1, 0));
        assert_eq!(parts("version:2.5"), VersionParts::new(2, 5));
        assert_eq!(parts("versionß3"), VersionParts::new(3, 0));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(parts("\t 4.5.6 \n"), VersionParts::from_components(4, 5, Some(6), None, None));
    }

    #[test]
    fn test_dot_without_digit_starts_remainder() {
        let p = parts("1.x");
        assert_eq!((p.major, p.minor, p.patch), (1, 0, None));
        assert_eq!(p.pre_release.as_deref(), Some("x"));

        let p = parts("1.2.");
        assert_eq!((p.major, p.minor, p.patch), (1, 2, None));
        assert_eq!(p.pre_release, None);
        assert_eq!(p.build, None);
    }

    #[test]
    fn test_fourth_number_becomes_pre_release() {
        let p = parts("96.0.4664.110");
        assert_eq!((p.major, p.minor, p.patch), (96, 0, Some(4664)));
        assert_eq!(p.pre_release.as_deref(), Some("110"));
    }

    #[test]
    fn test_build_only_qualifier() {
        let p = parts("1.0.0+001");
        assert_eq!(p.pre_release, None);
        assert_eq!(p.build.as_deref(), Some("001"));
    }

    #[test]
    fn test_space_separated_qualifiers() {
        let p = parts("10.15.7 Build 19H2");
        assert_eq!(p.pre_release.as_deref(), Some("Build"));
        assert_eq!(p.build.as_deref(), Some("19H2"));

        let p = parts("2.1 rc1");
        assert_eq!(p.pre_release.as_deref(), Some("rc1"));
        assert_eq!(p.build, None);
    }

    #[test]
    fn test_build_keeps_rest_of_text() {
        let p = parts("1.0-beta+exp sha 5114f85");
        assert_eq!(p.pre_release.as_deref(), Some("beta"));
        assert_eq!(p.build.as_deref(), Some("exp sha 5114f85"));
    }

    #[test]
    fn test_unanchored_qualifier_search() {
        // "beta" has no lead character, the search moves on to "-2"
        let p = parts("1.0beta-2");
        assert_eq!(p.pre_release.as_deref(), Some("2"));
        assert_eq!(p.build, None);

        let p = parts("3.1rc");
        assert_eq!(p.pre_release, None);
        assert_eq!(p.build, None);

        let p = parts("4.0x+7");
        assert_eq!(p.pre_release, None);
        assert_eq!(p.build.as_deref(), Some("7"));
    }

    #[test]
    fn test_dangling_build_lead() {
        let p = parts("1.0-alpha+");
        assert_eq!(p.pre_release, None);
        assert_eq!(p.build, None);

        // whitespace lead falls back to a build when the pre-release cannot close
        let p = parts("1.0 a+");
        assert_eq!(p.pre_release, None);
        assert_eq!(p.build.as_deref(), Some("a+"));
    }

    #[test]
    fn test_build_fallback() {
        let p = parts("Build 12345");
        assert_eq!((p.major, p.minor, p.patch), (0, 0, None));
        assert_eq!(p.pre_release, None);
        assert_eq!(p.build.as_deref(), Some("12345"));

        let p = parts("Mac OS X Build 21G72");
        assert_eq!(p.build.as_deref(), Some("21G72"));

        let p = parts("Builder Build 7");
        assert_eq!(p.build.as_deref(), Some("7"));
    }

    #[test]
    fn test_build_fallback_is_case_sensitive() {
        assert_eq!(parse("build 12345"), None);
        assert_eq!(parse("Build12345"), None);
    }

    #[test]
    fn test_unrecognized_input() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("latest"), None);
        assert_eq!(parse("version"), None);
        assert_eq!(parse("-1.0"), None);
    }

    #[test]
    fn test_multibyte_text() {
        let p = parts("2.0-βeta+ünï");
        assert_eq!(p.pre_release.as_deref(), Some("βeta"));
        assert_eq!(p.build.as_deref(), Some("ünï"));

        assert_eq!(parse("ünï Build ß"), Some(VersionParts {
            build: Some("ß".to_string()),
            ..VersionParts::default()
        }));
        assert_eq!(parse("vérsion 1"), None);
    }

    #[test]
    fn test_huge_numbers_saturate() {
        let p = parts("99999999999999999999999.1");
        assert_eq!(p.major, u64::MAX);
        assert_eq!(p.minor, 1);
    }
}
