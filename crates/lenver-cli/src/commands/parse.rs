//! `lenver parse`: show the components of each input

use super::CommandContext;
use lenver_core::error::LenverResult;
use lenver_core::{FrozenVersion, Versioned};
use serde_json::{json, Value};

pub fn execute(inputs: &[String], ctx: &CommandContext) -> LenverResult<()> {
    let versions: Vec<FrozenVersion> = inputs.iter().map(FrozenVersion::parse).collect();

    if ctx.output.is_json() {
        let values: Vec<Value> = versions.iter().map(to_json).collect();
        return ctx.output.json(&values);
    }

    for (index, version) in versions.iter().enumerate() {
        if index > 0 {
            ctx.output.line("");
        }
        ctx.output.line(&ctx.output.colors().bold(version.raw()));
        for (label, value) in fields(version) {
            ctx.output.field(label, &value);
        }
    }

    Ok(())
}

/// Labelled component values in display order
pub fn fields<V: Versioned + ?Sized>(version: &V) -> Vec<(&'static str, String)> {
    vec![
        ("rendered", version.render()),
        ("major", version.major().to_string()),
        ("minor", version.minor().to_string()),
        ("patch", optional(version.patch().map(|p| p.to_string()))),
        ("pre-release", optional(version.pre_release().map(str::to_string))),
        ("build", optional(version.build().map(str::to_string))),
    ]
}

pub fn to_json<V: Versioned + ?Sized>(version: &V) -> Value {
    json!({
        "raw": version.raw(),
        "rendered": version.render(),
        "major": version.major(),
        "minor": version.minor(),
        "patch": version.patch(),
        "pre_release": version.pre_release(),
        "build": version.build(),
        "is_pre_release": version.is_pre_release(),
    })
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}
