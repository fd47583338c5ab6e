//! Implementation of `glean compile`.

use std::process::ExitCode;

use glean_index::compile;

use super::shared::print_json;
use crate::cli::{args::CompileCommand, context::CommandContext};

/// Prints the patterns a query compiles to for a record type.
pub fn run(ctx: &CommandContext, cmd: &CompileCommand) -> ExitCode {
    let registry = match ctx.registry(&cmd.record_type) {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    let patterns = compile(&cmd.query, &*registry);
    if !cmd.regex {
        return print_json(&patterns);
    }

    if patterns.is_empty() {
        eprintln!("blank query: matches every record");
    }
    for pattern in &patterns {
        println!("{}", pattern.to_regex());
    }
    ExitCode::SUCCESS
}
