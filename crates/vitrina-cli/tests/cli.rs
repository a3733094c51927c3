//! CLI surface tests. These exercise argument handling only; nothing here
//! launches a browser.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn list_names_every_scenario() {
    let mut cmd = Command::cargo_bin("vitrina").unwrap();
    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("register_then_login"))
        .stdout(predicate::str::contains("guest_checkout"))
        .stdout(predicate::str::contains("contact_empty_submission"));
}

#[test]
fn run_rejects_unknown_scenarios_before_launching_anything() {
    let mut cmd = Command::cargo_bin("vitrina").unwrap();
    cmd.args(["run", "--scenario", "definitely_not_a_scenario"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario"));
}

#[test]
fn help_documents_the_run_options() {
    let mut cmd = Command::cargo_bin("vitrina").unwrap();
    cmd.args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url"))
        .stdout(predicate::str::contains("--scenario"))
        .stdout(predicate::str::contains("--artifacts"));
}
