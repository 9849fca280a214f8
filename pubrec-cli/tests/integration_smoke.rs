//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `pubrec` invocation isolated from the caller's config and store.
fn pubrec(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pubrec").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("PUBREC_CONFIG")
        .env_remove("PUBREC_DB")
        .env_remove("RUST_LOG");
    cmd
}

// === Help Tests ===

#[test]
fn test_top_level_help() {
    let home = tempfile::tempdir().unwrap();
    pubrec(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_serve_help() {
    let home = tempfile::tempdir().unwrap();
    pubrec(&home)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--static-dir"))
        .stdout(predicate::str::contains("--prefix"));
}

#[test]
fn test_query_help_lists_lookups() {
    let home = tempfile::tempdir().unwrap();
    pubrec(&home)
        .args(["query", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bulletin"))
        .stdout(predicate::str::contains("nilboard"))
        .stdout(predicate::str::contains("unconfirmed"));
}

// === Store Tests ===

#[test]
fn test_init_then_query_empty_store() {
    let home = tempfile::tempdir().unwrap();
    let db = home.path().join("data").join("record.db");

    pubrec(&home)
        .args(["init", "--db"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("record.db"));
    assert!(db.exists());

    pubrec(&home)
        .args(["query", "--db"])
        .arg(&db)
        .arg("boards")
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));

    pubrec(&home)
        .args(["query", "--db"])
        .arg(&db)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"));
}

#[test]
fn test_query_missing_board_fails() {
    let home = tempfile::tempdir().unwrap();
    let db = home.path().join("record.db");

    pubrec(&home).args(["init", "--db"]).arg(&db).assert().success();

    pubrec(&home)
        .env("PUBREC_DB", &db)
        .args(["query", "board", "ahimsa-dev"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_query_bad_day_fails() {
    let home = tempfile::tempdir().unwrap();
    let db = home.path().join("record.db");

    pubrec(&home).args(["init", "--db"]).arg(&db).assert().success();

    pubrec(&home)
        .env("PUBREC_DB", &db)
        .args(["query", "day", "31-02-2014"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed day"));
}

#[test]
fn test_missing_config_file_fails() {
    let home = tempfile::tempdir().unwrap();
    pubrec(&home)
        .args(["--config"])
        .arg(home.path().join("absent.toml"))
        .args(["query", "boards"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
