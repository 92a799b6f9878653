use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn inverts_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snippet.py");
    std::fs::write(&path, "if x < y:\n    pass\n").unwrap();

    Command::cargo_bin("opflip")
        .unwrap()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("inverted LESS_THAN at 1:3"))
        .stdout(predicate::str::contains("if x >= y:"));
}

#[test]
fn reads_stdin_when_no_file_is_given() {
    Command::cargo_bin("opflip")
        .unwrap()
        .write_stdin("x = 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No comparison operators found."))
        .stdout(predicate::str::contains("x = 1"));
}

#[test]
fn emits_json_when_asked() {
    Command::cargo_bin("opflip")
        .unwrap()
        .arg("--json")
        .write_stdin("if x != y:\n    pass\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"NOT_EQUAL\""))
        .stdout(predicate::str::contains("\"line\": 1"));
}

#[test]
fn reports_parse_errors_with_location() {
    Command::cargo_bin("opflip")
        .unwrap()
        .write_stdin("if x <:\n    pass\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn fails_on_missing_file() {
    Command::cargo_bin("opflip")
        .unwrap()
        .arg("does-not-exist.py")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
