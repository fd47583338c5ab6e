//! Implementation of `glean check`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Validates the configuration by building every field registry.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("Checking configuration...");
    println!();
    if let Some(path) = &config.path {
        println!("Config file: {}", path.display());
    }
    println!(
        "Settings: index_field = {:?}, keep_punctuation = {}",
        config.settings.index_field, config.settings.keep_punctuation
    );
    println!();

    if config.schema.is_empty() {
        println!("No record types defined.");
        return ExitCode::SUCCESS;
    }

    println!("Record types:");
    let mut failed = false;
    for name in config.schema.type_names() {
        match ctx.searchables().registry(name) {
            Ok(registry) => println!("  {name}: {} searchable fields", registry.len()),
            Err(e) => {
                println!("  {name}: error");
                eprintln!("error: {e}");
                failed = true;
            }
        }
    }
    println!();

    if failed {
        return ExitCode::FAILURE;
    }
    println!("No issues found.");
    ExitCode::SUCCESS
}
