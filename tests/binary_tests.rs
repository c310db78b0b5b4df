//! Integration tests for the sql-snippets binary.

use std::{fs, path::Path};

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::TempDir;

const COLLECTION: &str = r##"{
  "version": "1.0.0",
  "queries": [
    {"id": 1, "name": "Active users", "sql": "SELECT id FROM users WHERE active = 1 LIMIT 10;", "description": "Only active", "tags": ["t1"]},
    {"id": 2, "name": "Purge", "sql": "DELETE FROM sessions"}
  ],
  "tags": [
    {"id": "t1", "name": "reports", "color": "#3b82f6", "createdAt": "2024-01-01T00:00:00.000Z", "usageCount": 1}
  ]
}"##;

/// Command isolated from any user or local config
fn cmd(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("sql-snippets");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("SQL_SNIPPETS_TAGS")
        .env_remove("SQL_SNIPPETS_OUTPUT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn write_sql(dir: &TempDir, name: &str, sql: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, sql).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_validate_clean_exits_zero() {
    let dir = TempDir::new().unwrap();
    let file = write_sql(&dir, "clean.sql", "SELECT id FROM users LIMIT 5;");

    cmd(dir.path())
        .args(["validate", &file, "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_validate_warning_exits_one() {
    let dir = TempDir::new().unwrap();
    let file = write_sql(&dir, "warn.sql", "DELETE FROM users");

    cmd(dir.path())
        .args(["validate", &file, "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "UPDATE/DELETE without WHERE clause affects all rows"
        ));
}

#[test]
fn test_validate_error_exits_two() {
    let dir = TempDir::new().unwrap();
    let file = write_sql(&dir, "broken.sql", "SELECT (id FROM users;");

    cmd(dir.path())
        .args(["validate", &file, "--no-color"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Unmatched opening parenthesis"));
}

#[test]
fn test_validate_from_stdin_as_json() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .args(["-f", "json", "validate", "-"])
        .write_stdin("SELECT * FROM users")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"source\": \"stdin\""))
        .stdout(predicate::str::contains("\"queryType\": \"SELECT\""));
}

#[test]
fn test_validate_missing_file() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .args(["validate", "absent.sql"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_disabled_rules_from_local_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".sql-snippets.toml"),
        "[rules]\ndisabled = [\"STYLE001\", \"PERF002\", \"PERF005\"]\n"
    )
    .unwrap();
    let file = write_sql(&dir, "q.sql", "SELECT id FROM users ORDER BY id");

    cmd(dir.path())
        .args(["validate", &file, "--no-color"])
        .assert()
        .success();
}

#[test]
fn test_format_command() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .args(["format", "-"])
        .write_stdin("select id from users where active = 1")
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECT id \nFROM users \nWHERE active = 1"));
}

#[test]
fn test_insights_command() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .args(["insights", "-", "--no-color"])
        .write_stdin("SELECT a, b FROM t JOIN u ON t.id = u.id")
        .assert()
        .success()
        .stdout(predicate::str::contains("Joins: 1"));
}

#[test]
fn test_suggest_tags_command() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .args(["suggest-tags", "-", "--no-color"])
        .write_stdin("ALTER TABLE users ADD email TEXT")
        .assert()
        .success()
        .stdout(predicate::str::contains("#schema"));
}

#[test]
fn test_lint_collection() {
    let dir = TempDir::new().unwrap();
    let collection = write_sql(&dir, "backup.json", COLLECTION);

    cmd(dir.path())
        .args(["lint", &collection, "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Active users"))
        .stdout(predicate::str::contains("Summary: 2 checked, 0 invalid"));
}

#[test]
fn test_export_then_import_sql() {
    let dir = TempDir::new().unwrap();
    let collection = write_sql(&dir, "backup.json", COLLECTION);

    cmd(dir.path())
        .args([
            "export",
            &collection,
            "--format",
            "sql",
            "--output-dir",
            "out",
            "--no-color"
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 queries to"));

    let dump = fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|path| path.extension().is_some_and(|ext| ext == "sql"))
        .unwrap();
    let content = fs::read_to_string(&dump).unwrap();
    assert!(content.starts_with("-- SQL Query Manager Export\n"));
    assert!(content.contains("-- Tags: reports\n"));

    let records = dir.path().join("records.json");
    cmd(dir.path())
        .args([
            "import",
            dump.to_str().unwrap(),
            "-o",
            records.to_str().unwrap(),
            "--no-color"
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 queries"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(records).unwrap()).unwrap();
    assert_eq!(value[0]["name"], "Active users");
    assert_eq!(value[1]["sql"], "DELETE FROM sessions");
}

#[test]
fn test_export_json_uses_config_output_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".sql-snippets.toml"),
        "[export]\noutput_dir = \"backups\"\n"
    )
    .unwrap();
    let collection = write_sql(&dir, "backup.json", COLLECTION);

    cmd(dir.path())
        .args(["-f", "json", "export", &collection])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"format\": \"json\""))
        .stdout(predicate::str::contains("backups"));
}

#[test]
fn test_import_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let file = write_sql(&dir, "notes.txt", "SELECT 1;");

    cmd(dir.path())
        .args(["import", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_import_json_without_queries_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_sql(&dir, "empty.json", r#"{"tags": []}"#);

    cmd(dir.path())
        .args(["import", &file])
        .assert()
        .failure();
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_lint_and_export_leave_tag_store_alone() {
    let dir = TempDir::new().unwrap();
    let collection = write_sql(&dir, "backup.json", COLLECTION);
    let store = dir.path().join("store").join("tags.json");

    cmd(dir.path())
        .args(["--tags", store.to_str().unwrap(), "lint", &collection])
        .assert()
        .code(1);
    cmd(dir.path())
        .args([
            "--tags",
            store.to_str().unwrap(),
            "export",
            &collection,
            "--format",
            "sql",
            "--output-dir",
            "out"
        ])
        .assert()
        .success();

    assert!(!store.exists());
    let dump = fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .next()
        .unwrap();
    assert!(fs::read_to_string(dump).unwrap().contains("-- Tags: reports\n"));
}

#[test]
fn test_import_without_tag_store_keeps_tag_names() {
    let dir = TempDir::new().unwrap();
    let dump = write_sql(
        &dir,
        "dump.sql",
        "-- Query #1: Tagged\n-- Tags: reports, finance\nSELECT 1;\n"
    );
    let records = dir.path().join("records.json");

    cmd(dir.path())
        .args(["import", &dump, "-o", records.to_str().unwrap(), "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unresolved tags: reports, finance"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(records).unwrap()).unwrap();
    assert_eq!(value[0]["tagNames"][0], "reports");
}
