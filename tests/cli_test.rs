//! CLI binary integration tests using assert_cmd
//!
//! `cat` stands in for a real extractor so documents hold their own text.
#![cfg(unix)]

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn docsift(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docsift"));
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_index_and_search() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    fs::write(docs.path().join("a.docx"), "alpha beta").unwrap();
    fs::write(docs.path().join("b.pdf"), "gamma").unwrap();

    docsift(&home)
        .args(["index", "--extractor", "cat"])
        .arg(docs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents: 2"))
        .stdout(predicate::str::contains("Extracted: 2"));

    docsift(&home)
        .args(["search", "ALPHA"])
        .arg(docs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.json"))
        .stdout(predicate::str::contains("b.json").not())
        .stdout(predicate::str::contains("Found 1 matching files."));
}

#[test]
fn test_cli_refresh_skips_up_to_date() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    fs::write(docs.path().join("a.pdf"), "alpha").unwrap();

    for _ in 0..2 {
        docsift(&home)
            .args(["refresh", "--extractor", "cat"])
            .arg(docs.path())
            .assert()
            .success();
    }

    docsift(&home)
        .args(["refresh", "--extractor", "cat"])
        .arg(docs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"))
        .stdout(predicate::str::contains("Extracted: 0"));
}

#[test]
fn test_cli_search_defaults_to_current_directory() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    fs::write(docs.path().join("note.json"), r#"{"content": "Quarterly Numbers"}"#).unwrap();

    docsift(&home)
        .current_dir(docs.path())
        .args(["search", "quarterly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("note.json"))
        .stdout(predicate::str::contains("Found 1 matching files."));
}

#[test]
fn test_cli_extraction_failure_is_reported() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    fs::write(docs.path().join("a.pdf"), "alpha").unwrap();

    docsift(&home)
        .args(["index", "--extractor", "false"])
        .arg(docs.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Extraction failed"))
        .stdout(predicate::str::contains("Errors: 1"));

    assert!(!docs.path().join("a.json").exists());
}

#[test]
fn test_cli_invalid_root_fails() {
    let home = TempDir::new().unwrap();

    docsift(&home)
        .args(["index", "/nonexistent/docsift-root"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid root"));

    docsift(&home)
        .args(["search", "x", "/nonexistent/docsift-root"])
        .assert()
        .failure();
}

#[test]
fn test_cli_search_requires_query() {
    let home = TempDir::new().unwrap();
    docsift(&home).arg("search").assert().failure();
}
