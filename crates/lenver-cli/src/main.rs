//! # lenver-cli
//!
//! Command-line front end for lenver.
//!
//! This is the main entry point for the `lenver` binary. It parses arguments,
//! resolves configuration, sets up logging and a panic hook, and dispatches
//! to the command handlers.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use lenver_config::{ConfigLoader, ConfigSource, Settings};
use lenver_core::error::{LenverError, LenverResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Forgiving version parsing and ordering
#[derive(Parser)]
#[command(name = "lenver", version, about = "Forgiving version parsing and ordering")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Use this config file instead of the nearest lenver.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the components of one or more versions
    Parse {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Compare two versions
    Compare { left: String, right: String },
    /// Sort versions from oldest to newest
    Sort {
        versions: Vec<String>,
        /// Read versions from a file, one per line
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Newest first
        #[arg(short, long)]
        reverse: bool,
    },
    /// Pick the most frequently observed version
    Dominant {
        #[arg(required = true)]
        versions: Vec<String>,
    },
    /// Parse a Sec-CH-UA brand list and report its dominant version
    Brands {
        header: String,
        /// Treat the value as Sec-CH-UA-Full-Version-List
        #[arg(long)]
        full: bool,
    },
    /// Show the effective configuration
    Check,
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> LenverResult<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| LenverError::io("Failed to get current directory".to_string(), e))?;
    let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| LenverError::InvalidInput {
        message: format!("Working directory is not valid UTF-8: {}", e),
    })?;

    let (settings, sources) =
        ConfigLoader::new(cwd.clone()).load(cli.config.as_deref(), cli_overrides(&cli))?;

    setup_logging(&settings, cli.log_json);
    setup_panic_handler();

    debug!("Starting lenver v{}", env!("CARGO_PKG_VERSION"));
    log_sources(&sources);

    let ctx = CommandContext::new(cwd, settings, sources);
    commands::dispatch_command(cli.command, &ctx)
}

/// Flags that override configuration, keyed like `ConfigLayering` expects
fn cli_overrides(cli: &Cli) -> HashMap<String, String> {
    let mut overrides = HashMap::new();

    if cli.json {
        overrides.insert("format".to_string(), "json".to_string());
    }
    if cli.no_color {
        overrides.insert("color".to_string(), "false".to_string());
    }
    if cli.verbose {
        overrides.insert("log_level".to_string(), "debug".to_string());
    }

    overrides
}

fn setup_logging(settings: &Settings, json: bool) {
    let level = &settings.log_level;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "lenver={level},lenver_core={level},lenver_agent={level},lenver_config={level}",
            level = level
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("lenver encountered an unexpected error: {}", panic_info);
        eprintln!("lenver crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/lenver-rs/lenver/issues");
        eprintln!("Error: {}", panic_info);
    }));
}

fn log_sources(sources: &[ConfigSource]) {
    for source in sources {
        debug!(?source, "configuration layer");
    }
}
