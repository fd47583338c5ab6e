//! Implementation of `glean fields`.

use std::process::ExitCode;

use glean_index::FieldDescriptor;
use serde::Serialize;

use super::shared::print_json;
use crate::cli::{args::FieldsCommand, context::CommandContext};

/// One row of the field listing.
#[derive(Serialize)]
struct FieldRow<'a> {
    /// Name tokens are stored under.
    name: &'a str,
    /// Relation prefix, if any.
    prefix: Option<&'a str>,
    /// Field path from the record type.
    source: String,
    /// Effective punctuation handling.
    keep_punctuation: bool,
}

impl<'a> FieldRow<'a> {
    /// Builds a row from a descriptor.
    fn new(descriptor: &'a FieldDescriptor, keep_default: bool) -> Self {
        Self {
            name: descriptor.qualified_name(),
            prefix: descriptor.prefix(),
            source: descriptor.source(),
            keep_punctuation: descriptor.keeps_punctuation(keep_default),
        }
    }
}

/// Lists the searchable fields of a record type in registry order.
pub fn run(ctx: &CommandContext, cmd: &FieldsCommand) -> ExitCode {
    let registry = match ctx.registry(&cmd.record_type) {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    let keep_default = ctx.config.settings.keep_punctuation;
    let rows: Vec<FieldRow<'_>> = registry
        .iter()
        .map(|descriptor| FieldRow::new(descriptor, keep_default))
        .collect();

    if cmd.json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("{}: no searchable fields", cmd.record_type);
        return ExitCode::SUCCESS;
    }

    for line in text_lines(&rows) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}

/// Renders rows as aligned `name  prefix  <- source` lines.
///
/// Fields without a relation prefix show `-` in the prefix column.
fn text_lines(rows: &[FieldRow<'_>]) -> Vec<String> {
    let name_width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0);
    let prefix_width = rows
        .iter()
        .map(|row| row.prefix.map_or(1, str::len))
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|row| {
            let punctuation = if row.keep_punctuation {
                "  (keeps punctuation)"
            } else {
                ""
            };
            format!(
                "{:name_width$}  {:prefix_width$}  <- {}{punctuation}",
                row.name,
                row.prefix.unwrap_or("-"),
                row.source
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row<'a>(name: &'a str, prefix: Option<&'a str>, source: &str) -> FieldRow<'a> {
        FieldRow {
            name,
            prefix,
            source: source.to_string(),
            keep_punctuation: false,
        }
    }

    #[test]
    fn text_lines_show_prefix_column() {
        let rows = vec![
            row("title", None, "title"),
            row("actor_agent_name", Some("actor_agent"), "actors.agent.name"),
            FieldRow {
                keep_punctuation: true,
                ..row("email", None, "email")
            },
        ];
        assert_eq!(
            text_lines(&rows),
            vec![
                "title             -            <- title",
                "actor_agent_name  actor_agent  <- actors.agent.name",
                "email             -            <- email  (keeps punctuation)",
            ]
        );
    }
}
