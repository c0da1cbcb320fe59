//! Runs the `mailgrammar-cli` binary end to end.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mailgrammar-cli"))
        .args(args)
        .output()
        .expect("mailgrammar-cli runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn valid_addresses_exit_zero() {
    let output = run(&["A.b@Example.COM"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("[OK]"), "{text}");
    assert!(text.contains("(CUSTOM) -> A.b@example.com"), "{text}");
}

#[test]
fn any_invalid_address_exits_two() {
    let output = run(&["a@example.com", "plainaddress"]);
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("[INVALID] plainaddress (CUSTOM) :: InvalidFormat"), "{text}");
}

#[test]
fn absent_field_is_reported_as_missing() {
    let output = run(&["--source", "post", "--key", "email", "--data", "other=a@example.com"]);
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("[MISSING]"), "{text}");
    assert!(text.contains("UndefinedRequiredField"), "{text}");
}

#[test]
fn presets_and_flags_reach_the_validator() {
    assert_eq!(run(&["a@[127.0.0.1]"]).status.code(), Some(2));
    assert_eq!(run(&["--allow-domain-literal", "a@[127.0.0.1]"]).status.code(), Some(0));
    assert_eq!(run(&["--standard", "rfc5322", "a (c)@example.com"]).status.code(), Some(0));
    assert_eq!(
        run(&["--tld-blacklist", "com,net", "a@example.com"]).status.code(),
        Some(2)
    );
}

#[test]
fn usage_errors_exit_one() {
    assert_eq!(run(&["--format", "yaml", "a@example.com"]).status.code(), Some(1));
    assert_eq!(run(&["--standard", "rfc822", "a@example.com"]).status.code(), Some(1));
    assert_eq!(run(&["--source", "files", "--data", "mail=x"]).status.code(), Some(1));
}
