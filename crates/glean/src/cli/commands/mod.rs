//! Command implementations and dispatch.

pub mod check;
pub mod compile;
pub mod fields;
pub mod index;
pub mod init;
pub mod search;
mod shared;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Fields(cmd) => fields::run(ctx, &cmd),
        Commands::Index(cmd) => index::run(ctx, &cmd),
        Commands::Compile(cmd) => compile::run(ctx, &cmd),
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Check => check::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
