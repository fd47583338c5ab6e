//! Integration tests for glean-config.
//!
//! Tests the full loading pipeline: discovery -> parse -> schema -> registries.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use glean_config::{CONFIG_FILENAME, Config, ConfigError, config_template, is_global_config};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

const LIBRARY: &str = r#"
[settings]
index_field = "tokens"

[types.author]
fields = ["name", "bio"]
search = [{ field = "name" }, { field = "bio" }]

[types.book]
fields = ["title", "isbn", "metadata"]
relations = { authors = { type = "author", cardinality = "many" } }

[[types.book.search]]
field = "title"

[[types.book.search]]
field = "isbn"
keep_punctuation = true

[[types.book.search]]
field = "metadata"

[[types.book.search]]
field = "authors"
except = "bio"
"#;

#[test]
fn test_load_discovers_parent_config() {
    let env = TestEnv::new();
    let config_path = env.create_file(CONFIG_FILENAME, LIBRARY);
    let cwd = env.create_dir("shelves/fiction");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.path.as_deref(), Some(config_path.as_path()));
    assert_eq!(config.settings.index_field, "tokens");
    assert!(!config.settings.keep_punctuation);
}

#[test]
fn test_load_without_config() {
    let env = TestEnv::new();
    let cwd = env.create_dir("empty");

    match Config::load(&cwd) {
        Err(ConfigError::NoConfig { cwd: start }) => assert_eq!(start, cwd),
        Ok(config) => {
            // A global config in the test user's home is the only way to succeed.
            assert!(config.path.as_deref().is_some_and(is_global_config));
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_file_registries() {
    let env = TestEnv::new();
    let path = env.create_file("library.toml", LIBRARY);

    let config = Config::load_file(&path).unwrap();
    config.validate().unwrap();

    let registry = config.searchables().registry("book").unwrap();
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["title", "isbn", "metadata", "author_name"]);
}

#[test]
fn test_loaded_config_indexes_and_searches() {
    let env = TestEnv::new();
    let path = env.create_file("library.toml", LIBRARY);
    let config = Config::load_file(&path).unwrap();

    let registry = config.searchables().registry("book").unwrap();
    let indexer = config.indexer();
    let record = serde_json::json!({
        "title": "Dune",
        "isbn": "978-0-441-17271-9",
        "metadata": {"format": "Paperback"},
        "authors": [{"name": "Frank Herbert", "bio": "American author"}]
    });
    let tokens = indexer.index(&record, &registry);
    assert_eq!(
        tokens,
        vec![
            "title:dune",
            "isbn:978-0-441-17271-9",
            "metadata:format:paperback",
            "author_name:frank",
            "author_name:herbert"
        ]
    );

    let patterns = glean_index::compile("metadata:format:paperback herbert", &*registry);
    assert!(glean_index::matches_all(&tokens, &patterns));
    let patterns = glean_index::compile("american", &*registry);
    assert!(!glean_index::matches_all(&tokens, &patterns));
}

#[test]
fn test_invalid_toml_reports_path() {
    let env = TestEnv::new();
    let path = env.create_file("bad.toml", "[types.book\nfields = 3\n");

    let err = Config::load_file(&path).unwrap_err();
    assert!(err.to_string().contains("bad.toml"));
    assert!(matches!(err, ConfigError::ParseToml { .. }));
}

#[test]
fn test_unknown_relation_target() {
    let env = TestEnv::new();
    let path = env.create_file(
        "library.toml",
        r#"
[types.book]
relations = { publisher = { type = "company" } }
search = [{ field = "publisher" }]
"#,
    );

    let err = Config::load_file(&path).unwrap().validate().unwrap_err();
    assert!(err.to_string().contains("company"));
}

#[test]
fn test_written_template_loads() {
    let env = TestEnv::new();
    let path = env.create_file(CONFIG_FILENAME, &config_template());

    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.path.as_deref(), Some(path.as_path()));
    assert!(config.schema.is_empty());
    config.validate().unwrap();
}
