//! `lenver sort`: order versions oldest first

use super::CommandContext;
use lenver_core::error::{LenverError, LenverResult};
use lenver_core::{FrozenVersion, Versioned};
use std::path::Path;
use tracing::debug;

pub fn execute(
    mut inputs: Vec<String>,
    file: Option<&Path>,
    reverse: bool,
    ctx: &CommandContext,
) -> LenverResult<()> {
    if let Some(path) = file {
        inputs.extend(read_lines(&ctx.cwd.as_std_path().join(path))?);
    }

    if inputs.is_empty() {
        return Err(LenverError::InvalidInput {
            message: "no versions to sort".to_string(),
        });
    }

    let sorted = sort_versions(&inputs, reverse);

    if ctx.output.is_json() {
        let raw: Vec<&str> = sorted.iter().map(|v| v.raw()).collect();
        return ctx.output.json(&raw);
    }

    for version in &sorted {
        ctx.output.line(version.raw());
    }
    Ok(())
}

/// Stable sort, so equal versions keep their input order
pub fn sort_versions(inputs: &[String], reverse: bool) -> Vec<FrozenVersion> {
    let mut versions: Vec<FrozenVersion> = inputs.iter().map(FrozenVersion::parse).collect();
    if reverse {
        versions.sort_by(|a, b| b.cmp(a));
    } else {
        versions.sort();
    }
    versions
}

/// Non-empty trimmed lines of a file
pub fn read_lines(path: &Path) -> LenverResult<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LenverError::io(format!("Failed to read {}", path.display()), e))?;

    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!("Read {} version(s) from {}", lines.len(), path.display());
    Ok(lines)
}
