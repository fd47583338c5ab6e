//! Implementation of `glean search`.

use std::process::ExitCode;

use glean_index::{MemoryStore, StoredRecord};
use serde_json::{Value, json};

use super::shared::{print_json, read_records};
use crate::cli::{args::SearchCommand, context::CommandContext};

/// Indexes records in memory and prints those matching the query.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let registry = match ctx.registry(&cmd.record_type) {
        Ok(registry) => registry,
        Err(code) => return code,
    };
    let records = match read_records(&cmd.records) {
        Ok(records) => records,
        Err(code) => return code,
    };

    let mut store = MemoryStore::new(registry).with_indexer(ctx.config.indexer());
    for record in records {
        store.insert(record);
    }

    let matches = store.search(&cmd.query);
    eprintln!("{} of {} records match", matches.len(), store.len());

    let output: Vec<Value> = matches
        .into_iter()
        .map(|stored| render(stored, cmd.tokens))
        .collect();
    print_json(&output)
}

/// Renders a match, optionally with its tokens.
fn render(stored: &StoredRecord, with_tokens: bool) -> Value {
    if with_tokens {
        json!({"record": stored.record, "tokens": stored.tokens})
    } else {
        stored.record.clone()
    }
}
