//! `lenver check`: show the effective configuration and where it came from

use super::CommandContext;
use lenver_config::{ConfigSource, OutputFormat};
use lenver_core::error::LenverResult;
use serde_json::json;

pub fn execute(ctx: &CommandContext) -> LenverResult<()> {
    let settings = &ctx.settings;

    if ctx.output.is_json() {
        return ctx.output.json(&json!({
            "settings": settings,
            "sources": ctx.sources,
        }));
    }

    ctx.output.success("Configuration is valid");
    ctx.output.field("brands", &settings.known_brands.join(", "));
    ctx.output.field(
        "format",
        match settings.format {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        },
    );
    ctx.output.field("color", &settings.color.to_string());
    ctx.output.field("log level", &settings.log_level);

    for source in &ctx.sources {
        ctx.output.field("source", &describe(source));
    }
    Ok(())
}

pub fn describe(source: &ConfigSource) -> String {
    match source {
        ConfigSource::Defaults => "defaults".to_string(),
        ConfigSource::Global(path) => format!("global {}", path),
        ConfigSource::Project(path) => format!("project {}", path),
        ConfigSource::Explicit(path) => format!("--config {}", path),
        ConfigSource::Environment(var) => format!("env {}", var),
        ConfigSource::CommandLine => "command line".to_string(),
    }
}
