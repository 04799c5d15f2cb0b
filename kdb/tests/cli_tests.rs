//! CLI integration tests for kdb.
//!
//! Database-backed tests run against a temporary SQLite file.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use tempfile::TempDir;

/// Get a command for the kdb binary.
fn cmd() -> Command {
    Command::cargo_bin("kdb").unwrap()
}

/// Create `app.db` with the `foo` and `bar` tables.
fn sqlite_fixture(dir: &Path) -> PathBuf {
    sqlite_database(
        &dir.join("app.db"),
        &[
            "CREATE TABLE foo (a INTEGER NOT NULL, b TEXT, c BLOB)",
            "CREATE TABLE bar (d REAL, e BOOLEAN, f DATETIME)",
            "CREATE TABLE user_accounts (user_id INTEGER, type TEXT, shape GEOMETRY)",
        ],
    )
}

/// Create a SQLite file at `path` and run `statements` against it.
fn sqlite_database(path: &Path, statements: &[&str]) -> PathBuf {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
        for sql in statements {
            sqlx::query(sql).execute(&mut conn).await.unwrap();
        }
        conn.close().await.unwrap();
    });

    path.to_path_buf()
}

fn setup() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let db = sqlite_fixture(dir.path());
    (dir, db.to_string_lossy().into_owned())
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_generate_subcommand_help() {
    cmd()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--struct-name"))
        .stdout(predicate::str::contains("--field-name"))
        .stdout(predicate::str::contains("--types"))
        .stdout(predicate::str::contains("--from-row"))
        .stdout(predicate::str::contains("--omit-header"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kdb"));
}

#[test]
fn test_completions() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kdb"));
}

// =============================================================================
// Argument Errors
// =============================================================================

#[test]
fn test_missing_arguments() {
    cmd().arg("generate").assert().failure();
}

#[test]
fn test_unknown_dialect() {
    cmd()
        .args(["generate", "oracle", "scott/tiger"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported database 'oracle'"));
}

#[test]
fn test_unknown_name_format() {
    cmd()
        .args(["generate", "sqlite3", "app.db", "--struct-name", "uppercase"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown name format 'uppercase'"));
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_generate_to_stdout() {
    let (dir, db) = setup();

    cmd()
        .current_dir(dir.path())
        .args(["generate", "sqlite3", &db, "--package", "db"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "// Code generated by kdb. DO NOT EDIT.\n// kdb generate sqlite3 --package db\n",
        ))
        .stdout(predicate::str::contains("//! Table types for the `db` package."))
        .stdout(predicate::str::contains(
            "pub struct Foo {\n    pub a: i64,\n    pub b: String,\n    pub c: Vec<u8>,\n}",
        ))
        .stdout(predicate::str::contains(
            "pub struct Bar {\n    pub d: f64,\n    pub e: bool,\n    pub f: chrono::NaiveDateTime,\n}",
        ))
        .stdout(predicate::str::contains("pub struct Useraccounts {"))
        .stdout(predicate::str::contains(db.as_str()).not());
}

#[test]
fn test_generate_warns_about_unmapped_types() {
    let (dir, db) = setup();

    cmd()
        .current_dir(dir.path())
        .args(["generate", "sqlite3", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("/// Unmapped database type `geometry`."))
        .stderr(predicate::str::contains("Unmapped column type"));
}

#[test]
fn test_generate_with_options() {
    let (dir, db) = setup();

    cmd()
        .current_dir(dir.path())
        .args([
            "generate",
            "sqlite3",
            &db,
            "--field-name",
            "capitalize,nounderscore",
            "--types",
            "nullable",
            "--from-row",
            "--omit-header",
            "--indent",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("//! Table types for the `model` package."))
        .stdout(predicate::str::contains("#[derive(Debug, Clone, sqlx::FromRow)]"))
        .stdout(predicate::str::contains(
            "  #[sqlx(rename = \"user_id\")]\n  pub Userid: Option<i64>,",
        ))
        .stdout(predicate::str::contains("  pub A: i64,"))
        .stdout(predicate::str::contains("  pub B: Option<String>,"));
}

#[test]
fn test_generate_to_file() {
    let (dir, db) = setup();
    let output = dir.path().join("src/model/tables.rs");

    cmd()
        .current_dir(dir.path())
        .args(["generate", "sqlite3", &db, "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("pub struct Foo {"));
    assert!(content.contains("pub const TABLE: &'static str = \"foo\";"));
}

#[cfg(unix)]
#[test]
fn test_generate_with_non_utf8_argument() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let (dir, db) = setup();
    let output = dir.path().join(OsString::from_vec(b"model\xFF.rs".to_vec()));

    cmd()
        .current_dir(dir.path())
        .args(["generate", "sqlite3", &db, "-o"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("panicked").not());

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("model\u{FFFD}.rs"));
    assert!(content.contains("pub struct Foo {"));
    assert!(!content.contains(db.as_str()));
}

#[test]
fn test_generate_keeps_option_equal_to_url() {
    let (dir, _db) = setup();

    cmd()
        .current_dir(dir.path())
        .args(["generate", "--package", "app.db", "sqlite3", "app.db"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "// kdb generate --package app.db sqlite3\n",
        ))
        .stdout(predicate::str::contains("//! Table types for the `app.db` package."));
}

#[test]
fn test_generate_warns_about_colliding_names() {
    let dir = tempfile::tempdir().unwrap();
    let db = sqlite_database(
        &dir.path().join("names.db"),
        &[
            "CREATE TABLE user_name (id INTEGER)",
            "CREATE TABLE username (id INTEGER)",
        ],
    );

    cmd()
        .current_dir(dir.path())
        .arg("generate")
        .arg("sqlite3")
        .arg(&db)
        .assert()
        .success()
        .stderr(predicate::str::contains("Emitted names collide"))
        .stderr(predicate::str::contains("user_name, username"));
}

#[test]
fn test_generate_uses_config_file() {
    let (dir, db) = setup();
    std::fs::write(
        dir.path().join("kdb.toml"),
        "[naming]\ntable = \"lowercase\"\n\n[output]\npackage = \"store\"\n",
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["generate", "sqlite3", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("//! Table types for the `store` package."))
        .stdout(predicate::str::contains("pub struct foo {"));
}

#[test]
fn test_generate_flag_overrides_config_file() {
    let (dir, db) = setup();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[output]\npackage = \"store\"\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["generate", "sqlite3", &db, "--package", "db", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("//! Table types for the `db` package."));
}

#[test]
fn test_generate_invalid_config_file() {
    let (dir, db) = setup();
    std::fs::write(dir.path().join("kdb.toml"), "[naming]\ntable = \"shout\"\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["generate", "sqlite3", &db])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid naming pipeline"));
}

#[test]
fn test_generate_missing_database_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.db");
    let output = dir.path().join("out.rs");

    cmd()
        .current_dir(dir.path())
        .arg("generate")
        .arg("sqlite3")
        .arg(&missing)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to connect to SQLite"));

    assert!(!output.exists());
    assert!(!missing.exists());
}

// =============================================================================
// Inspection
// =============================================================================

#[test]
fn test_inspect_report() {
    let (dir, db) = setup();

    cmd()
        .current_dir(dir.path())
        .args(["inspect", "sqlite", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("SQLite schema"))
        .stdout(predicate::str::contains("Tables: 3"))
        .stdout(predicate::str::contains("foo -> Foo:"))
        .stdout(predicate::str::contains("user_accounts -> Useraccounts:"));
}

#[test]
fn test_inspect_json() {
    let (dir, db) = setup();

    let output = cmd()
        .current_dir(dir.path())
        .args(["inspect", "sqlite3", &db, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["package_name"], "model");
    assert_eq!(json["tables"][0]["source_name"], "foo");
    assert_eq!(json["tables"][0]["fields"][0]["ty"], "int64");
    assert_eq!(json["tables"][0]["fields"][0]["nullable"], false);
    assert_eq!(json["tables"][1]["emit_name"], "Bar");
}
