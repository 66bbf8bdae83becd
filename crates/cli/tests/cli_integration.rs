use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn write_program(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write program");
    file
}

fn rill() -> Command {
    Command::cargo_bin("rill").expect("binary")
}

#[test]
fn run_records_one_value_per_step() {
    let program = write_program("{ :root\n x = 1\n x += 2\n}\n");
    rill()
        .args(["run", program.path().to_str().expect("path"), "--steps", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("root:x: 3 3 3"));
}

#[test]
fn run_json_output_carries_the_series() {
    let program = write_program("{ :root\n x = 1\n x += 2\n}\n");
    let output = rill()
        .args([
            "run",
            program.path().to_str().expect("path"),
            "--steps",
            "2",
            "--output",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(parsed["steps"], 2);
    assert_eq!(parsed["series"]["root:x"], serde_json::json!([3.0, 3.0]));
}

#[test]
fn run_with_zero_steps_records_nothing() {
    let program = write_program("{ :root\n x = 1\n}\n");
    rill()
        .args(["run", program.path().to_str().expect("path")])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn run_reports_division_by_zero() {
    let program = write_program("{ :root\n a ^= 5 / 0\n}\n");
    rill()
        .args(["run", program.path().to_str().expect("path"), "--steps", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn run_reports_a_missing_file() {
    rill()
        .args(["run", "no-such-program.rill", "--steps", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn check_accepts_a_valid_program() {
    let program = write_program("{ :root\n x = 5\n}\n");
    rill()
        .args(["check", program.path().to_str().expect("path")])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn check_dumps_tokens_and_tree() {
    let program = write_program("{ :root\n x = 5\n}\n");
    rill()
        .args([
            "check",
            program.path().to_str().expect("path"),
            "--dump-tokens",
            "--dump-tree",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ScopeName"))
        .stdout(predicate::str::contains("Set"));
}

#[test]
fn check_reports_an_unterminated_scope() {
    let program = write_program("{ :root\n x = 5\n");
    rill()
        .args(["check", program.path().to_str().expect("path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse error"));
}

#[test]
fn check_reports_an_illegal_character() {
    let program = write_program("{ :root\n x = 5 %\n}\n");
    rill()
        .args(["check", program.path().to_str().expect("path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected character"));
}

#[test]
fn check_json_error_output_is_structured() {
    let program = write_program("{ :root\n x = 5\n");
    let output = rill()
        .args([
            "check",
            program.path().to_str().expect("path"),
            "--output",
            "json",
        ])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(parsed["error"]["stage"], "parse");
    assert!(parsed["error"]["message"]
        .as_str()
        .expect("message")
        .contains("token index"));
}
