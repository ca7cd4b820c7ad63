//! `lenver dominant`: the version observed most often

use super::CommandContext;
use lenver_agent::VersionTally;
use lenver_core::error::LenverResult;
use serde_json::json;

pub fn execute(inputs: &[String], ctx: &CommandContext) -> LenverResult<()> {
    let tally: VersionTally = inputs.iter().collect();
    let dominant = tally.dominant();

    if ctx.output.is_json() {
        let counts: Vec<_> = tally
            .iter()
            .map(|(version, count)| json!({ "version": version, "count": count }))
            .collect();
        return ctx.output.json(&json!({ "dominant": dominant, "counts": counts }));
    }

    match dominant {
        Some(version) => ctx.output.line(version),
        None => ctx.output.warn("No version was observed more than once"),
    }
    Ok(())
}
