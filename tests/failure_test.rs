use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_rejected_payment_leaves_failed_state() {
    let script = common::write_script(&common::happy_path()).unwrap();

    let mut cmd = Command::new(cargo_bin!("paywizard"));
    cmd.arg(script.path())
        .arg("--no-delay")
        .arg("--fail-with")
        .arg("card declined");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Payment failed: card declined"))
        .stdout(predicate::str::contains("3,1,50000,false,false,card declined"));
}

#[test]
fn test_reset_after_failure() {
    let mut rows = common::happy_path();
    rows.push(("reset", ""));
    let script = common::write_script(&rows).unwrap();

    let mut cmd = Command::new(cargo_bin!("paywizard"));
    cmd.arg(script.path())
        .arg("--no-delay")
        .arg("--fail-with")
        .arg("card declined");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,,0,false,false,"));
}

#[test]
fn test_retry_after_transient_failure() {
    let mut rows = common::happy_path();
    rows.push(("retry", ""));
    let script = common::write_script(&rows).unwrap();

    let mut cmd = Command::new(cargo_bin!("paywizard"));
    cmd.arg(script.path())
        .arg("--no-delay")
        .arg("--fail-with")
        .arg("timeout")
        .arg("--fail-times")
        .arg("1")
        .arg("--trace");

    let output = cmd
        .assert()
        .success()
        .stderr(predicate::str::contains("Payment failed: timeout"))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    // Header plus one row per action
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[4], "3,1,50000,false,false,timeout");
    assert_eq!(lines[5], "3,1,50000,false,true,");
}

#[test]
fn test_fail_times_requires_reason() {
    let script = common::write_script(&common::happy_path()).unwrap();

    let mut cmd = Command::new(cargo_bin!("paywizard"));
    cmd.arg(script.path()).arg("--fail-times").arg("1");

    cmd.assert().failure();
}
