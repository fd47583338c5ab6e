//! Error types for glean configuration.

use std::{io, path::PathBuf};

use glean_index::SchemaError;
use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// No configuration file was found.
    #[error("no .glean.toml found in {cwd} or its parents (run `glean init`)")]
    NoConfig {
        /// Directory discovery started from.
        cwd: PathBuf,
    },

    /// The configured record types cannot be resolved.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
