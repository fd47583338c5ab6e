//! Configuration system for glean.
//!
//! glean reads record types and their search declarations from a TOML file
//! named `.glean.toml`. The file closest to the current working directory
//! wins; `~/.glean.toml` is used when no local file exists.

#![warn(missing_docs)]

mod discovery;
mod error;
mod parse;
mod templates;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_file, global_config_path, is_global_config};
pub use error::ConfigError;
use glean_index::{Indexer, RecordType, Relation, Schema, SearchDeclaration, Searchables};
pub use parse::{
    RawConfig, RawRelation, RawSearch, RawSettings, RawType, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::config_template;
use tracing::debug;

/// Loaded glean configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General settings.
    pub settings: Settings,
    /// Record types and their search declarations.
    pub schema: Schema,
    /// File the configuration was loaded from.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration that applies to `cwd`.
    ///
    /// Returns [`ConfigError::NoConfig`] if neither a local nor a global
    /// `.glean.toml` exists.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let path = discover_config_file(cwd).ok_or_else(|| ConfigError::NoConfig {
            cwd: cwd.to_path_buf(),
        })?;
        Self::load_file(&path)
    }

    /// Loads configuration from a specific file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config_file(path)?;
        let config = Self::from_raw(raw, Some(path.to_path_buf()));
        debug!(
            path = %path.display(),
            types = config.schema.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let raw = parse_config_str(contents, Path::new("<string>"))?;
        Ok(Self::from_raw(raw, None))
    }

    /// Converts parsed TOML into settings and a schema.
    ///
    /// Name resolution is deferred to [`Config::validate`] and registry builds.
    pub fn from_raw(raw: RawConfig, path: Option<PathBuf>) -> Self {
        let settings = raw
            .settings
            .map(Settings::from_raw)
            .unwrap_or_default();

        let mut schema = Schema::new();
        for (name, raw_type) in &raw.types {
            let mut record_type = RecordType::new(name.clone());
            for field in &raw_type.fields {
                record_type = record_type.field(field.clone());
            }
            for (field, relation) in &raw_type.relations {
                record_type = record_type.relation(field.clone(), Relation::from(relation));
            }
            for search in &raw_type.search {
                let declaration = SearchDeclaration::from(search);
                record_type = record_type.search_on(declaration.field, declaration.options);
            }
            schema.insert(record_type);
        }

        Self {
            settings,
            schema,
            path,
        }
    }

    /// Returns a registry cache over the configured schema.
    pub fn searchables(&self) -> Searchables {
        Searchables::new(self.schema.clone())
    }

    /// Returns an indexer applying the configured punctuation default.
    pub fn indexer(&self) -> Indexer {
        Indexer::new().keep_punctuation(self.settings.keep_punctuation)
    }

    /// Builds the field registry of every record type.
    ///
    /// Fails with the first unknown field, unknown relation target or
    /// relation cycle found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.searchables().validate()?;
        Ok(())
    }
}

/// General settings for glean.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Record key `glean index` stores tokens under.
    pub index_field: String,
    /// Default punctuation handling for declarations that do not set it.
    pub keep_punctuation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_field: "searchable_values".to_string(),
            keep_punctuation: false,
        }
    }
}

impl Settings {
    /// Applies parsed settings over the defaults.
    fn from_raw(raw: RawSettings) -> Self {
        let defaults = Self::default();
        Self {
            index_field: raw.index_field.unwrap_or(defaults.index_field),
            keep_punctuation: raw.keep_punctuation.unwrap_or(defaults.keep_punctuation),
        }
    }
}
