//! Command implementations and dispatch logic.
//!
//! Each command builds its result first and only then prints it through the
//! shared [`OutputHandler`], either as text lines or as one JSON document.

use camino::Utf8PathBuf;
use lenver_config::{ConfigSource, Settings};
use lenver_core::error::LenverResult;
use serde_json::json;
use tracing::info;

pub mod brands;
pub mod check;
pub mod compare;
pub mod dominant;
pub mod parse;
pub mod sort;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    pub settings: Settings,
    pub sources: Vec<ConfigSource>,
}

impl CommandContext {
    pub fn new(cwd: Utf8PathBuf, settings: Settings, sources: Vec<ConfigSource>) -> Self {
        let output = OutputHandler::new(settings.format, settings.color);
        Self {
            cwd,
            output,
            settings,
            sources,
        }
    }
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &CommandContext) -> LenverResult<()> {
    match command {
        Commands::Parse { text } => {
            info!("Parsing {} version(s)", text.len());
            parse::execute(&text, ctx)
        },
        Commands::Compare { left, right } => {
            info!("Comparing {} with {}", left, right);
            compare::execute(&left, &right, ctx)
        },
        Commands::Sort {
            versions,
            file,
            reverse,
        } => {
            info!("Sorting versions (reverse: {})", reverse);
            sort::execute(versions, file.as_deref(), reverse, ctx)
        },
        Commands::Dominant { versions } => {
            info!("Tallying {} version(s)", versions.len());
            dominant::execute(&versions, ctx)
        },
        Commands::Brands { header, full } => {
            info!("Reading brand list (full: {})", full);
            brands::execute(&header, full, ctx)
        },
        Commands::Check => check::execute(ctx),
        Commands::Version => show_version(ctx),
    }
}

/// Show version information
fn show_version(ctx: &CommandContext) -> LenverResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("LENVER_BUILD_DATE");
    let rustc = env!("LENVER_RUSTC_VERSION");
    let target = env!("LENVER_TARGET");

    if ctx.output.is_json() {
        return ctx.output.json(&json!({
            "version": version,
            "build_date": build_date,
            "rustc": rustc,
            "target": target,
        }));
    }

    ctx.output.line(&format!("lenver {}", version));
    ctx.output.field("built", build_date);
    ctx.output.field("rustc", rustc);
    ctx.output.field("target", target);
    Ok(())
}
