use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn prints_help() {
    let mut cmd = Command::cargo_bin("gazetteer").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn bad_argument_fails() {
    let mut cmd = Command::cargo_bin("gazetteer").unwrap();
    cmd.arg("--does-not-exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn list_prints_the_seeded_roster() {
    let mut cmd = Command::cargo_bin("gazetteer").unwrap();
    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("California"))
        .stdout(predicate::str::contains("Los Angeles"));
}

#[test]
fn list_json_is_parseable() {
    let mut cmd = Command::cargo_bin("gazetteer").unwrap();
    let assert = cmd.args(["list", "--json"]).assert().success();
    let parsed: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["state"], "California");
    assert_eq!(entries[0]["city"], "Los Angeles");
}
