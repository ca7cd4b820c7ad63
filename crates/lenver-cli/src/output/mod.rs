//! Terminal output formatting and utilities.
//!
//! Commands build their results as plain lines or JSON values and hand them
//! here, so the configured output format and color choice apply uniformly.

pub mod colors;
pub mod errors;

use lenver_config::OutputFormat;
use lenver_core::error::{LenverError, LenverResult};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
    format: OutputFormat,
}

impl OutputHandler {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        let colors = if color {
            colors::ColorSupport::detect()
        } else {
            colors::ColorSupport::disabled()
        };

        Self { colors, format }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn colors(&self) -> &colors::ColorSupport {
        &self.colors
    }

    /// Print a plain result line
    pub fn line(&self, message: &str) {
        println!("{}", message);
    }

    /// Print a labelled value, label dimmed
    pub fn field(&self, label: &str, value: &str) {
        println!("{} {}", self.colors.dim(&format!("{:>12}", label)), value);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a value as pretty JSON
    pub fn json<T: serde::Serialize + ?Sized>(&self, value: &T) -> LenverResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| LenverError::Json {
            message: e.to_string(),
        })?;
        println!("{}", text);
        Ok(())
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new(OutputFormat::Text, true)
    }
}
