//! User-agent brand parsing and dominant version selection
//!
//! Client hint headers such as `Sec-CH-UA` list the same browser version
//! under several brand names. This crate extracts those brands and picks the
//! version the header agrees on most, with a fallback to the first
//! recognized brand.

pub mod brand;
pub mod hints;
pub mod tally;

// Re-export main types
pub use brand::UserAgentBrand;
pub use hints::{parse_brand_pairs, ClientHints, HintKind, KNOWN_BRANDS};
pub use tally::VersionTally;
