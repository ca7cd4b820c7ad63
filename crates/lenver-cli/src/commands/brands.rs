//! `lenver brands`: read a client hint brand list

use super::CommandContext;
use lenver_agent::{ClientHints, HintKind};
use lenver_core::error::LenverResult;
use lenver_core::Versioned;
use serde_json::{json, Value};

pub fn execute(header: &str, full: bool, ctx: &CommandContext) -> LenverResult<()> {
    let hints = hints_for(header, full, &ctx.settings.known_brands);

    if ctx.output.is_json() {
        return ctx.output.json(&to_json(&hints));
    }

    ctx.output.line(&ctx.output.colors().bold(hints.kind().header_name()));
    for brand in hints.brands() {
        let marker = if is_known(&hints, brand.name()) {
            ctx.output.colors().green("*")
        } else {
            " ".to_string()
        };
        ctx.output
            .line(&format!("{} {} {}", marker, brand.name(), brand.version().render()));
    }

    match hints.dominant_version() {
        Some(version) => ctx.output.field("dominant", &version.render()),
        None => ctx.output.warn("No dominant version in brand list"),
    }
    Ok(())
}

/// Whether a brand is on the known-brand list used for the fallback
pub fn is_known(hints: &ClientHints, name: &str) -> bool {
    hints.known_brands().iter().any(|known| known == name)
}

pub fn hints_for(header: &str, full: bool, known: &[String]) -> ClientHints {
    let kind = if full {
        HintKind::FullVersionList
    } else {
        HintKind::Brands
    };
    ClientHints::new(kind, header).with_known_brands(known.iter().cloned())
}

pub fn to_json(hints: &ClientHints) -> Value {
    let dominant = hints.dominant_version();
    json!({
        "header": hints.kind().header_name(),
        "brands": hints.brands(),
        "dominant": dominant.as_ref().map(|v| v.render()),
        "major": hints.major_version(),
    })
}
