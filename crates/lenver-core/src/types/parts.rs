//! Version components and loose component construction.

use crate::grammar::parse_digits;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The five components extracted from version text.
///
/// `major` and `minor` are always concrete. `patch`, `pre_release` and
/// `build` are `None` when the input did not specify them; `None` never means
/// zero or an empty token.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Archive,
    Deserialize,
    Serialize,
    SerdeDeserialize,
    SerdeSerialize,
)]
#[archive(check_bytes)]
pub struct VersionParts {
    pub major: u64,
    pub minor: u64,
    pub patch: Option<u64>,
    pub pre_release: Option<String>,
    pub build: Option<String>,
}

/// Errors raised when building a version from loosely typed components
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    #[error("expected an object or an array of components, found {found}")]
    NotAContainer { found: String },

    #[error("component '{component}' cannot be a {found}")]
    InvalidType {
        component: &'static str,
        found: String,
    },

    #[error("component '{component}' is not a non-negative integer: {value}")]
    InvalidNumber {
        component: &'static str,
        value: String,
    },
}

const COMPONENT_NAMES: [&str; 5] = ["major", "minor", "patch", "pre_release", "build"];

impl VersionParts {
    /// Create components with only major and minor set
    pub fn new(major: u64, minor: u64) -> Self {
        Self {
            major,
            minor,
            ..Self::default()
        }
    }

    /// Create components from explicit values.
    ///
    /// Pre-release and build are taken verbatim; an empty token is stored as
    /// absent.
    pub fn from_components(
        major: u64,
        minor: u64,
        patch: Option<u64>,
        pre_release: Option<&str>,
        build: Option<&str>,
    ) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: token(pre_release),
            build: token(build),
        }
    }

    /// Build components from a JSON object or positional array.
    ///
    /// Objects use the keys `major`, `minor`, `patch`, `pre_release` and
    /// `build`; arrays list up to five entries in that order. Unknown keys and
    /// extra entries are ignored, `null` marks a component as absent.
    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        let slots: Vec<Option<&Value>> = match value {
            Value::Object(map) => COMPONENT_NAMES.iter().map(|name| map.get(*name)).collect(),
            Value::Array(items) => (0..COMPONENT_NAMES.len()).map(|i| items.get(i)).collect(),
            other => {
                return Err(ComponentError::NotAContainer {
                    found: json_type(other).to_string(),
                })
            },
        };

        Ok(Self {
            major: number_component("major", slots[0])?.unwrap_or(0),
            minor: number_component("minor", slots[1])?.unwrap_or(0),
            patch: number_component("patch", slots[2])?,
            pre_release: token_component("pre_release", slots[3])?,
            build: token_component("build", slots[4])?,
        })
    }

    /// Check if a pre-release token is present
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }
}

impl fmt::Display for VersionParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;

        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }

        if let Some(ref pre) = self.pre_release {
            write!(f, "-{}", pre)?;
        }

        if let Some(ref build) = self.build {
            write!(f, "+{}", build)?;
        }

        Ok(())
    }
}

/// Normalize an optional token, treating an empty string as absent
pub(crate) fn token(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn number_component(
    component: &'static str,
    value: Option<&Value>,
) -> Result<Option<u64>, ComponentError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
            ComponentError::InvalidNumber {
                component,
                value: n.to_string(),
            }
        }),
        Some(Value::String(s)) => {
            let digits = s.trim();
            if digits.is_empty() {
                Ok(None)
            } else if digits.bytes().all(|b| b.is_ascii_digit()) {
                Ok(Some(parse_digits(digits)))
            } else {
                Err(ComponentError::InvalidNumber {
                    component,
                    value: s.clone(),
                })
            }
        },
        Some(other) => Err(ComponentError::InvalidType {
            component,
            found: json_type(other).to_string(),
        }),
    }
}

fn token_component(
    component: &'static str,
    value: Option<&Value>,
) -> Result<Option<String>, ComponentError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(token(Some(s.as_str()))),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(ComponentError::InvalidType {
            component,
            found: json_type(other).to_string(),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
