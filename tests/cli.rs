//! CLI integration tests for todo
//!
//! Only paths that need neither the network nor the OS keyring are
//! exercised here: input validation, dry-run imports and config commands.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn todo_cmd(config_dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("todo"));
    cmd.arg("--config").arg(config_path(config_dir));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn config_path(dir: &TempDir) -> PathBuf {
    dir.path().join("config.toml")
}

// =============================================================================
// Task content validation
// =============================================================================

#[test]
fn test_add_without_content_is_a_user_error() {
    let dir = TempDir::new().unwrap();

    todo_cmd(&dir)
        .args(["add", ""])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("task content not given"));
}

#[test]
fn test_done_rejects_mangled_comma_list() {
    let dir = TempDir::new().unwrap();

    todo_cmd(&dir)
        .args(["done", "eggs", "System.Object[]"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("put quotes around the input when it has commas"));
}

#[test]
fn test_due_and_no_due_conflict() {
    let dir = TempDir::new().unwrap();

    todo_cmd(&dir)
        .args(["add", "x", "--due", "today", "--no-due"])
        .assert()
        .code(2);
}

// =============================================================================
// Import dry run
// =============================================================================

#[test]
fn test_import_dry_run_from_file() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes.md");
    fs::write(
        &notes,
        "# Work\n- [ ] Email report [240315]\n\n* Book flights\nDONE\nNever seen\n",
    )
    .unwrap();

    todo_cmd(&dir)
        .args(["import", "--dry-run", "--file"])
        .arg(&notes)
        .assert()
        .success()
        .stdout(predicate::str::contains("section Work"))
        .stdout(predicate::str::contains("task    Email report (due 2024-03-15)"))
        .stdout(predicate::str::contains("task    Book flights"))
        .stdout(predicate::str::contains("Never seen").not())
        .stdout(predicate::str::contains(
            "Dry run: 2 task(s) and 1 section(s) would be created",
        ));
}

#[test]
fn test_import_dry_run_from_stdin() {
    let dir = TempDir::new().unwrap();

    todo_cmd(&dir)
        .args(["import", "--dry-run"])
        .write_stdin("Call mom\n# Home\nClean kitchen\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("task    Call mom"))
        .stdout(predicate::str::contains("section Home"))
        .stdout(predicate::str::contains("2 task(s) and 1 section(s)"));
}

#[test]
fn test_import_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();

    todo_cmd(&dir)
        .args(["import", "--dry-run", "--file"])
        .arg(dir.path().join("missing.md"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.md"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_first_run_writes_default_config() {
    let dir = TempDir::new().unwrap();

    todo_cmd(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    let content = fs::read_to_string(config_path(&dir)).unwrap();
    assert!(content.contains("default_project = \"Inbox\""));
}

#[test]
fn test_config_set_then_show() {
    let dir = TempDir::new().unwrap();

    todo_cmd(&dir)
        .args(["config", "set", "general.default_project", "Work"])
        .assert()
        .success();

    todo_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Work"));

    let content = fs::read_to_string(config_path(&dir)).unwrap();
    assert!(content.contains("default_project = \"Work\""));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();

    todo_cmd(&dir)
        .args(["config", "set", "general.nope", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_reset_with_force() {
    let dir = TempDir::new().unwrap();

    todo_cmd(&dir)
        .args(["config", "set", "api.timeout_secs", "5"])
        .assert()
        .success();

    todo_cmd(&dir)
        .args(["config", "reset", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(config_path(&dir)).unwrap();
    assert!(content.contains("timeout_secs = 30"));
}

#[test]
fn test_broken_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(config_path(&dir), "[general\n").unwrap();

    todo_cmd(&dir)
        .args(["config", "path"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}
