//! End-to-end tests of the `drydock` binary.
//!
//! These exercise routing and exit codes only; nothing here talks to a
//! controller.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn drydock() -> Command {
    let mut cmd = Command::cargo_bin("drydock").unwrap();
    cmd.env_remove("DRYDOCK_PROFILE");
    cmd
}

#[test]
fn no_arguments_prints_usage_and_fails() {
    drydock()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: drydock <command> [<args>...]"));
}

#[test]
fn help_succeeds() {
    drydock()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("issues API calls to a drydock controller"));

    drydock()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: drydock <command>"));
}

#[test]
fn version_prints_package_version() {
    drydock()
        .arg("--version")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_in_command_position_fails() {
    drydock()
        .arg("--frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "--frobnicate is not a recognized command or option",
        ));
}

#[test]
fn unknown_domain_without_plugin_fails() {
    drydock()
        .arg("frobnicate:now")
        .env("PATH", "")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Found no matching command, try 'drydock help'",
        ));
}

#[test]
fn unknown_verb_in_known_domain_succeeds() {
    drydock()
        .arg("apps:frobnicate")
        .assert()
        .success()
        .stderr(predicate::str::contains("Found no matching command"));
}

#[test]
fn domain_help_lists_its_verbs() {
    drydock()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config:set"));
}

#[test]
fn shortcuts_are_listed() {
    drydock()
        .arg("shortcuts")
        .assert()
        .success()
        .stdout(predicate::str::contains("create -> apps:create"));
}

#[test]
fn bad_options_exit_with_usage() {
    drydock()
        .args(["apps:list", "--frobnicate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--frobnicate"));
}

#[test]
fn missing_profile_asks_for_login() {
    let home = TempDir::new().unwrap();
    drydock()
        .args(["apps:list"])
        .env("HOME", home.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Client configuration file not found"))
        .stderr(predicate::str::contains("drydock login"));
}
