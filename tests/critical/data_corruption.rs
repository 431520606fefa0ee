//! Phase 1 (P0): ledger database file corruption.
//! A corrupted file must surface as a typed open error, never as an empty
//! ledger that the next toggle would overwrite.

use assert_cmd::Command;
use predicates::prelude::*;
use shelfmark_core::{Database, DbError};

use crate::support::critical_utils::corrupted_database;

#[tokio::test]
async fn p0_corrupted_database_store_cannot_open() {
    let (_temp, path) = corrupted_database();
    let before = std::fs::read(&path).expect("read corrupted file");

    let err = Database::new(path.as_path())
        .await
        .expect_err("opening corrupted DB should fail");

    assert!(
        matches!(&err, DbError::Connection(_) | DbError::Migration(_)),
        "expected DbError::Connection or DbError::Migration, got {err:?}"
    );
    assert_eq!(
        std::fs::read(&path).expect("reread corrupted file"),
        before,
        "failed open must not rewrite the file"
    );
}

#[test]
fn p0_corrupted_database_toggle_exits_failure() {
    let (temp, path) = corrupted_database();
    let before = std::fs::read(&path).expect("read corrupted file");

    Command::cargo_bin("shelfmark")
        .expect("binary built")
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(&path)
        .args(["toggle", "saved", "papers", "p1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Saved paper").not())
        .stderr(predicate::str::contains("Failed to open database"));

    assert_eq!(
        std::fs::read(&path).expect("reread corrupted file"),
        before,
        "toggle must not write into a corrupted ledger file"
    );
    assert!(
        !temp.path().join("data").exists(),
        "no fallback database should be created"
    );
}

#[test]
fn p0_corrupted_database_list_exits_failure() {
    let (temp, path) = corrupted_database();

    Command::cargo_bin("shelfmark")
        .expect("binary built")
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(&path)
        .args(["list", "saved", "papers"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("No saved papers.").not())
        .stderr(predicate::str::contains("Failed to open database"));
}
