//! CLI integration tests for glean commands.
//!
//! These tests focus on exit codes and the JSON output of record commands,
//! not on human-readable formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

/// Configuration shared by most tests.
const CONFIG: &str = r#"
[types.person]
fields = ["name", "email"]
search = [{ field = "name" }, { field = "email" }]

[types.video]
fields = ["title", "metadata"]
relations = { cast = { type = "person", cardinality = "many" } }

[[types.video.search]]
field = "title"

[[types.video.search]]
field = "metadata"

[[types.video.search]]
field = "cast"
only = "name"
"#;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Creates a project directory with a config and a records file.
fn project() -> tempfile::TempDir {
    let dir = temp_dir();
    fs::write(dir.path().join(".glean.toml"), CONFIG).unwrap();
    let records = json!([
        {"title": "Alpha", "metadata": {"resolution": "1080p"}},
        {"title": "Beta", "metadata": {"resolution": "1080i"}},
        {"title": "Gamma", "metadata": {"resolution": "720p"}},
        {"title": "Delta", "metadata": {"director": "Alan Smithee"},
         "cast": [{"name": "Ann Lee", "email": "ann@example.com"}]}
    ]);
    fs::write(dir.path().join("videos.json"), records.to_string()).unwrap();
    dir
}

/// Helper to run `glean` in `dir` with HOME isolated to it.
fn glean(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("glean").unwrap();
    cmd.current_dir(dir).env("HOME", dir).env_remove("GLEAN_LOG");
    cmd
}

/// Parses stdout of a successful run as JSON.
fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Extracts the titles of a JSON array of records.
fn titles(records: &Value) -> Vec<&str> {
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect()
}

#[test]
fn test_help() {
    let dir = temp_dir();
    glean(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"));
}

#[test]
fn test_search_help_shows_query_syntax() {
    let dir = temp_dir();
    glean(dir.path())
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QUERY SYNTAX"));
}

#[test]
fn test_missing_config_fails() {
    let dir = temp_dir();
    glean(dir.path())
        .args(["fields", "video"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no .glean.toml"));
}

#[test]
fn test_init_creates_config() {
    let dir = temp_dir();
    glean(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(dir.path().join(".glean.toml").is_file());

    glean(dir.path()).arg("init").assert().failure();
    glean(dir.path()).args(["init", "--force"]).assert().success();
    glean(dir.path()).arg("check").assert().success();
}

#[test]
fn test_check_valid_config() {
    let dir = project();
    glean(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("video: 3 searchable fields"));
}

#[test]
fn test_check_reports_unknown_field() {
    let dir = temp_dir();
    fs::write(
        dir.path().join(".glean.toml"),
        "[types.video]\nsearch = [{ field = \"title\" }]\n",
    )
    .unwrap();
    glean(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

#[test]
fn test_explicit_config_path() {
    let dir = temp_dir();
    let config = dir.path().join("custom.toml");
    fs::write(&config, CONFIG).unwrap();
    glean(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["fields", "video"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cast_name"));
}

#[test]
fn test_fields_text_shows_prefix() {
    let dir = project();
    glean(dir.path())
        .args(["fields", "video"])
        .assert()
        .success()
        .stdout(predicate::str::contains("title      -     <- title"))
        .stdout(predicate::str::contains("cast_name  cast  <- cast.name"));
}

#[test]
fn test_fields_json() {
    let dir = project();
    let fields = json_output(glean(dir.path()).args(["fields", "video", "--json"]));
    let names: Vec<&str> = fields
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["title", "metadata", "cast_name"]);
    assert_eq!(fields[2]["prefix"], "cast");
    assert_eq!(fields[2]["source"], "cast.name");
}

#[test]
fn test_fields_unknown_type() {
    let dir = project();
    glean(dir.path())
        .args(["fields", "studio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown record type"));
}

#[test]
fn test_index_adds_tokens() {
    let dir = project();
    let records = json_output(glean(dir.path()).args(["index", "video", "videos.json"]));
    assert_eq!(
        records[3]["searchable_values"],
        json!([
            "title:delta",
            "metadata:director:alan",
            "metadata:director:smithee",
            "cast_name:ann",
            "cast_name:lee"
        ])
    );
}

#[test]
fn test_index_reads_stdin() {
    let dir = project();
    let records = json_output(
        glean(dir.path())
            .args(["index", "person", "-"])
            .write_stdin(r#"{"name": "Bo", "email": "bo@example.com"}"#),
    );
    assert_eq!(
        records[0]["searchable_values"],
        json!(["name:bo", "email:bo", "email:example", "email:com"])
    );
}

#[test]
fn test_compile_json() {
    let dir = project();
    let patterns = json_output(glean(dir.path()).args([
        "compile",
        "video",
        "metadata:resolution:1080p",
    ]));
    assert_eq!(
        patterns,
        json!([
            {"field": {"exact": "metadata"}, "word": "resolution", "case_insensitive": true},
            {"field": {"exact": "metadata"}, "word": "1080p", "case_insensitive": true}
        ])
    );
}

#[test]
fn test_compile_regex() {
    let dir = project();
    glean(dir.path())
        .args(["compile", "video", "Title:Alpha beta", "--regex"])
        .assert()
        .success()
        .stdout("(?i)^title:.*alpha\n(?i)^[^:]+:.*beta\n");
}

#[test]
fn test_search_key_value_scenarios() {
    let dir = project();
    let found = json_output(glean(dir.path()).args([
        "search",
        "video",
        "videos.json",
        "metadata:resolution:1080p",
    ]));
    assert_eq!(titles(&found), vec!["Alpha"]);

    let found = json_output(glean(dir.path()).args([
        "search",
        "video",
        "videos.json",
        "metadata:director:'alan smithee'",
    ]));
    assert_eq!(titles(&found), vec!["Delta"]);
}

#[test]
fn test_search_blank_query_matches_all() {
    let dir = project();
    let found = json_output(glean(dir.path()).args(["search", "video", "videos.json", ""]));
    assert_eq!(titles(&found), vec!["Alpha", "Beta", "Gamma", "Delta"]);
}

#[test]
fn test_search_with_tokens() {
    let dir = project();
    let found = json_output(glean(dir.path()).args([
        "search",
        "video",
        "videos.json",
        "cast_name:ann",
        "--tokens",
    ]));
    assert_eq!(found[0]["record"]["title"], "Delta");
    assert!(found[0]["tokens"].as_array().unwrap().len() > 1);
}

#[test]
fn test_search_invalid_json() {
    let dir = project();
    fs::write(dir.path().join("bad.json"), "[{").unwrap();
    glean(dir.path())
        .args(["search", "video", "bad.json", "alpha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}
