//! A single brand entry from a client hint header.

use lenver_core::FrozenVersion;
use serde::Serialize;
use std::fmt;

/// Brand name paired with the version it reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAgentBrand {
    name: String,
    version: FrozenVersion,
}

impl UserAgentBrand {
    /// Create a brand from a name and either a version value or version text
    pub fn new(name: impl Into<String>, version: impl Into<FrozenVersion>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &FrozenVersion {
        &self.version
    }

    /// Case-insensitive name check
    pub fn is_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for UserAgentBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
