use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_quick_amounts_clamp_at_ceiling() {
    // 20,000 presses of 500,000 would be 10,000,000,000 without the clamp.
    let mut rows = vec![("select", "3"), ("next", "")];
    rows.extend(std::iter::repeat_n(("quick", "500000"), 20_000));
    let script = common::write_script(&rows).unwrap();

    let mut cmd = Command::new(cargo_bin!("paywizard"));
    cmd.arg(script.path()).arg("--no-delay");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2,3,9999999999,false,false,"));
}

#[test]
fn test_backspace_on_zero_stays_zero() {
    let script = common::write_script(&[
        ("select", "1"),
        ("next", ""),
        ("backspace", ""),
        ("backspace", ""),
    ])
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("paywizard"));
    cmd.arg(script.path()).arg("--no-delay");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2,1,0,false,false,"));
}

#[test]
fn test_cannot_confirm_zero_amount() {
    let script = common::write_script(&[
        ("select", "1"),
        ("next", ""),
        ("digit", "7"),
        ("backspace", ""),
        ("next", ""),
    ])
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("paywizard"));
    cmd.arg(script.path()).arg("--no-delay");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Cannot leave step 2: amount is zero"))
        .stdout(predicate::str::contains("2,1,0,false,false,"));
}
