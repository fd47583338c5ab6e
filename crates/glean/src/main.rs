//! glean: inline full-text search for structured records.
//!
//! Record types and their searchable fields are declared in `.glean.toml`.
//! glean flattens records into `field:word` token sequences and filters them
//! with a small query language.

#![warn(missing_docs)]

mod cli;

use std::{io, process::ExitCode};

use cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GLEAN_LOG";

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(cli.config),
        _ => CommandContext::load(cli.config),
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}

/// Installs a stderr log subscriber.
///
/// `-v` enables debug output; otherwise the filter comes from `GLEAN_LOG`,
/// defaulting to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}
