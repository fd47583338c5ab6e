//! Configuration file parsing.
//!
//! Parses `.glean.toml` files into `Raw*` structures that mirror the TOML
//! layout exactly. Conversion into a schema happens in the crate root.

use std::{collections::BTreeMap, fs, path::Path};

use glean_index::{Cardinality, Relation, SearchDeclaration, SearchOptions};
use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// General settings section.
    pub settings: Option<RawSettings>,
    /// Record type definitions: name -> type.
    pub types: BTreeMap<String, RawType>,
}

/// Raw general settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    /// Record key `glean index` stores tokens under.
    pub index_field: Option<String>,
    /// Default punctuation handling for every declaration.
    pub keep_punctuation: Option<bool>,
}

/// Raw record type definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawType {
    /// Plain field names.
    pub fields: Vec<String>,
    /// Relation fields: name -> relation.
    pub relations: BTreeMap<String, RawRelation>,
    /// Search declarations in declaration order.
    pub search: Vec<RawSearch>,
}

/// Raw relation definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRelation {
    /// Related record type.
    #[serde(rename = "type")]
    pub target: String,
    /// `one` (default) or `many`.
    #[serde(default)]
    pub cardinality: Cardinality,
}

impl From<&RawRelation> for Relation {
    fn from(raw: &RawRelation) -> Self {
        Self {
            target: raw.target.clone(),
            cardinality: raw.cardinality,
        }
    }
}

/// Raw search declaration.
///
/// `only` and `except` accept either a single name or a list.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearch {
    /// Field or relation to search on.
    pub field: String,
    /// Replacement name for the field or relation prefix.
    pub alias: Option<String>,
    /// Related fields to expose.
    #[serde(default)]
    #[serde_as(as = "OneOrMany<_>")]
    pub only: Vec<String>,
    /// Related fields to hide.
    #[serde(default)]
    #[serde_as(as = "OneOrMany<_>")]
    pub except: Vec<String>,
    /// Suppress the relation prefix.
    pub skip_prefix: Option<bool>,
    /// Keep punctuation when tokenizing.
    pub keep_punctuation: Option<bool>,
}

impl From<&RawSearch> for SearchDeclaration {
    fn from(raw: &RawSearch) -> Self {
        let options = SearchOptions {
            alias: raw.alias.clone(),
            only: raw.only.clone(),
            except: raw.except.clone(),
            skip_prefix: raw.skip_prefix,
            keep_punctuation: raw.keep_punctuation,
        };
        Self::new(raw.field.clone(), options)
    }
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.settings.is_none());
        assert!(config.types.is_empty());
    }

    #[test]
    fn test_parse_settings() {
        let toml = r#"
[settings]
index_field = "tokens"
keep_punctuation = true
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let settings = config.settings.unwrap();
        assert_eq!(settings.index_field.as_deref(), Some("tokens"));
        assert_eq!(settings.keep_punctuation, Some(true));
    }

    #[test]
    fn test_parse_type() {
        let toml = r#"
[types.movie]
fields = ["title", "tags"]
relations = { actors = { type = "person", cardinality = "many" }, studio = { type = "studio" } }

[[types.movie.search]]
field = "title"

[[types.movie.search]]
field = "actors"
only = "name"
alias = "cast"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let movie = config.types.get("movie").unwrap();
        assert_eq!(movie.fields, vec!["title", "tags"]);

        let actors = Relation::from(movie.relations.get("actors").unwrap());
        assert_eq!(actors, Relation::many("person"));
        let studio = Relation::from(movie.relations.get("studio").unwrap());
        assert_eq!(studio, Relation::one("studio"));

        assert_eq!(movie.search.len(), 2);
        let declaration = SearchDeclaration::from(&movie.search[1]);
        assert_eq!(declaration.field, "actors");
        assert_eq!(declaration.options.only, vec!["name"]);
        assert_eq!(declaration.options.alias.as_deref(), Some("cast"));
        assert!(declaration.options.except.is_empty());
    }

    #[test]
    fn test_parse_list_filters() {
        let toml = r#"
[types.movie]
search = [{ field = "crew", except = ["email", "phone"], skip_prefix = true }]
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let search = &config.types.get("movie").unwrap().search[0];
        assert_eq!(search.except, vec!["email", "phone"]);
        assert_eq!(search.skip_prefix, Some(true));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_config_str("[types.movie\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_config_file(Path::new("/nonexistent/.glean.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
