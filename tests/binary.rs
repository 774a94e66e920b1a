//! Integration tests for the rconsole binary

mod common;

use assert_cmd::Command;
use common::create_fixture_tree;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn rconsole() -> Command {
    let mut cmd = Command::cargo_bin("rconsole").unwrap();
    cmd.env_remove("COMMANDS_DIRECTORY")
        .env_remove("COMMANDS_NAMESPACE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_builtin_commands() {
    rconsole()
        .assert()
        .success()
        .stdout(predicate::str::contains("config:check"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_config_check_reports_missing_variables() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "COMMANDS_NAMESPACE=app::commands\n").unwrap();

    rconsole()
        .arg("config:check")
        .arg(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("COMMANDS_DIRECTORY is not defined in"))
        .stderr(predicate::str::contains("COMMANDS_NAMESPACE").not());
}

#[test]
fn test_config_check_passes() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".env"),
        "COMMANDS_DIRECTORY=commands\nCOMMANDS_NAMESPACE=app::commands\n",
    )
    .unwrap();

    rconsole()
        .arg("config:check")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Command discovery is configured"));
}

#[test]
fn test_scan_prints_derived_names() {
    let temp_dir = create_fixture_tree();
    fs::write(
        temp_dir.path().join(".env"),
        "COMMANDS_DIRECTORY=commands\nCOMMANDS_NAMESPACE=fixtures::commands\n",
    )
    .unwrap();

    rconsole()
        .arg("scan")
        .arg("--dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "namespaced:sub-namespaced:sub-namespaced-test-command",
        ))
        .stdout(predicate::str::contains("fixtures::commands::bad_command::bad_test_command"))
        .stdout(predicate::str::contains("ignored").not());
}

#[test]
fn test_scan_yaml() {
    let temp_dir = create_fixture_tree();
    fs::write(
        temp_dir.path().join(".env"),
        "COMMANDS_DIRECTORY=commands\nCOMMANDS_NAMESPACE=fixtures::commands\n",
    )
    .unwrap();

    rconsole()
        .args(["scan", "--yaml", "--dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("command: test-command"))
        .stdout(predicate::str::contains("type_name: fixtures::commands::test_command"));
}

#[test]
fn test_scan_without_configuration_fails() {
    let temp_dir = TempDir::new().unwrap();

    rconsole()
        .arg("scan")
        .arg("--dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("COMMANDS_DIRECTORY is not defined in rconsole"));
}
