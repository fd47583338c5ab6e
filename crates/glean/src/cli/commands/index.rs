//! Implementation of `glean index`.

use std::process::ExitCode;

use serde_json::Value;

use super::shared::{print_json, read_records};
use crate::cli::{args::IndexCommand, context::CommandContext};

/// Prints the records with their token sequences stored under the index field.
pub fn run(ctx: &CommandContext, cmd: &IndexCommand) -> ExitCode {
    let registry = match ctx.registry(&cmd.record_type) {
        Ok(registry) => registry,
        Err(code) => return code,
    };
    let mut records = match read_records(&cmd.records) {
        Ok(records) => records,
        Err(code) => return code,
    };

    let indexer = ctx.config.indexer();
    let index_field = &ctx.config.settings.index_field;
    for (position, record) in records.iter_mut().enumerate() {
        let tokens = indexer.index(record, &registry);
        let Value::Object(fields) = record else {
            eprintln!("error: record {position} is not a JSON object");
            return ExitCode::FAILURE;
        };
        fields.insert(
            index_field.clone(),
            Value::Array(tokens.into_iter().map(Value::String).collect()),
        );
    }

    print_json(&records)
}
