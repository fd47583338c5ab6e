//! Helpers shared by record-processing commands.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::ExitCode,
};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Reads records from a JSON file, or stdin when `path` is `-`.
///
/// The file may hold a single record or an array of records.
pub fn read_records(path: &Path) -> Result<Vec<Value>, ExitCode> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        fs::read_to_string(path)
    };
    let contents = contents.map_err(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        ExitCode::FAILURE
    })?;

    let parsed: Value = serde_json::from_str(&contents).map_err(|e| {
        eprintln!("error: invalid JSON in {}: {e}", path.display());
        ExitCode::FAILURE
    })?;

    let records = match parsed {
        Value::Array(records) => records,
        record => vec![record],
    };
    debug!(path = %path.display(), records = records.len(), "read records");
    Ok(records)
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            ExitCode::FAILURE
        }
    }
}
