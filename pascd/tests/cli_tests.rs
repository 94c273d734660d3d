//! End-to-end tests driving the `pascd` binary itself, rather than the
//! library crates it is built on.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn pascd_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pascd"))
}

#[test]
fn compiling_a_well_formed_program_prints_the_ast() {
    let input = fixtures_dir().join("hello.pas");

    Command::new(pascd_bin())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Binary Program"));
}

#[test]
fn emit_tokens_prints_one_token_per_line() {
    let input = fixtures_dir().join("hello.pas");

    Command::new(pascd_bin())
        .arg(&input)
        .arg("--emit-tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("Program"))
        .stdout(predicate::str::contains("Eof"));
}

#[test]
fn a_syntax_error_is_reported_with_its_position_and_exits_nonzero() {
    let input = fixtures_dir().join("bad.pas");

    Command::new(pascd_bin())
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::starts_with("Error:"))
        .stdout(predicate::str::contains("Line: 3"));
}

#[test]
fn a_missing_file_argument_fails_with_a_usage_message() {
    Command::new(pascd_bin())
        .assert()
        .failure()
        .stderr(predicate::str::contains("usage"));
}

#[test]
fn a_nonexistent_file_fails_with_an_io_error() {
    Command::new(pascd_bin())
        .arg("does-not-exist.pas")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read"));
}
