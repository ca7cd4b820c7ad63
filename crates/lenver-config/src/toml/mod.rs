//! lenver.toml configuration parsing and serialization

use crate::ConfigResult;
use lenver_core::error::LenverError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Log levels accepted by `[log] level`
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Complete lenver.toml configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LenverToml {
    /// Brand recognition for client hint headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<BrandsSection>,

    /// Output formatting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSection>,

    /// Logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogSection>,
}

/// `[brands]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrandsSection {
    /// Brands whose version is trusted when no version repeats
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known: Option<Vec<String>>,
}

/// `[output]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Colored terminal output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// `[log]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Default tracing level when RUST_LOG is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = LenverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(LenverError::config(
                "output.format",
                format!("expected 'text' or 'json', found '{}'", other),
            )),
        }
    }
}

/// Parse TOML string to lenver configuration
pub fn parse_lenver_toml(content: &str) -> ConfigResult<LenverToml> {
    // First try with toml_edit for better error reporting
    content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| toml_error(content, format!("TOML syntax error: {}", e.message()), e.span()))?;

    // Then parse with serde for type safety
    let config: LenverToml = toml::from_str(content)
        .map_err(|e| toml_error(content, e.message().to_string(), e.span()))?;

    validate_config(&config)?;

    Ok(config)
}

/// Serialize lenver configuration to a TOML string
pub fn serialize_lenver_toml(config: &LenverToml) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| LenverError::TomlParse {
        message: format!("TOML serialization error: {}", e),
        line: 0,
        column: 0,
    })
}

/// Validate configuration values serde cannot check
pub fn validate_config(config: &LenverToml) -> ConfigResult<()> {
    if let Some(known) = config.brands.as_ref().and_then(|b| b.known.as_ref()) {
        validate_known_brands(known)?;
    }

    if let Some(level) = config.log.as_ref().and_then(|l| l.level.as_deref()) {
        validate_log_level(level)?;
    }

    Ok(())
}

/// Brand names must be non-empty once trimmed
pub fn validate_known_brands(known: &[String]) -> ConfigResult<()> {
    match known.iter().position(|name| name.trim().is_empty()) {
        Some(index) => Err(LenverError::config(
            "brands.known",
            format!("entry {} is empty", index),
        )),
        None => Ok(()),
    }
}

pub fn validate_log_level(level: &str) -> ConfigResult<()> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(LenverError::config(
            "log.level",
            format!("unknown level '{}', expected one of {}", level, LOG_LEVELS.join(", ")),
        ))
    }
}

/// Load and parse lenver.toml from file path
pub fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<LenverToml> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LenverError::io(format!("Failed to read {}", path), e))?;

    parse_lenver_toml(&content).map_err(|e| match e {
        LenverError::TomlParse {
            message,
            line,
            column,
        } => LenverError::TomlParse {
            message: format!("In file {}: {}", path, message),
            line,
            column,
        },
        LenverError::ConfigValidation { field, reason } => LenverError::ConfigValidation {
            field,
            reason: format!("In file {}: {}", path, reason),
        },
        other => other,
    })
}

fn toml_error(content: &str, message: String, span: Option<Range<usize>>) -> LenverError {
    let (line, column) = location(content, span);
    LenverError::TomlParse {
        message,
        line,
        column,
    }
}

/// 1-based line and column of a byte span start, (0, 0) when unknown
fn location(content: &str, span: Option<Range<usize>>) -> (usize, usize) {
    let Some(span) = span else {
        return (0, 0);
    };

    let before = content.get(..span.start).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}
