//! `lenver compare`: relate two versions

use super::CommandContext;
use lenver_core::error::LenverResult;
use lenver_core::{FrozenVersion, Versioned};
use serde_json::{json, Value};
use std::cmp::Ordering;

pub fn execute(left: &str, right: &str, ctx: &CommandContext) -> LenverResult<()> {
    let left = FrozenVersion::parse(left);
    let right = FrozenVersion::parse(right);

    if ctx.output.is_json() {
        return ctx.output.json(&to_json(&left, &right));
    }

    ctx.output.line(&format!(
        "{} {} {}",
        left.render(),
        symbol(left.compare_to(&right)),
        right.render()
    ));
    Ok(())
}

pub fn symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "==",
        Ordering::Greater => ">",
    }
}

pub fn to_json(left: &FrozenVersion, right: &FrozenVersion) -> Value {
    let ordering = match left.compare_to(right) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    };

    json!({
        "left": left.render(),
        "right": right.render(),
        "ordering": ordering,
        "newer_than": left.newer_than(right),
        "older_than": left.older_than(right),
        "same_as": left.same_as(right),
        "differs_from": left.differs_from(right),
        "at_least": left.at_least(right),
        "at_most": left.at_most(right),
    })
}
