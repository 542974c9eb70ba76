//! Integration tests for the Intcode CLI.
//!
//! These tests invoke the `intcode` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn intcode() -> Command {
    Command::cargo_bin("intcode").unwrap()
}

/// Write program text to a file in `dir` and return its path.
fn write_program(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("program.txt");
    fs::write(&path, text).unwrap();
    path
}

const EQUALS_EIGHT: &str = "3,9,8,9,10,9,4,9,99,-1,8\n";
const QUINE: &str = "109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99";
const FEEDBACK: &str = "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,\
                        27,4,27,1001,28,-1,28,1005,28,6,99,0,0,5";
const SERIAL: &str = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0";

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    intcode()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: intcode"));
}

#[test]
fn help_flag_exits_0() {
    intcode()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    intcode()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown command"));
}

// ---- Run ----

#[test]
fn run_with_input_flag() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, EQUALS_EIGHT);
    intcode()
        .args(["run", path.to_str().unwrap(), "--input", "8"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn run_reads_input_from_stdin() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, EQUALS_EIGHT);
    intcode()
        .args(["run", path.to_str().unwrap()])
        .write_stdin("5\n")
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn run_prints_every_output() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, QUINE);
    let expected: String = QUINE.split(',').map(|v| format!("{v}\n")).collect();
    intcode()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn run_without_enough_input_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, EQUALS_EIGHT);
    intcode()
        .args(["run", path.to_str().unwrap()])
        .write_stdin("")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("input exhausted"));
}

#[test]
fn run_unknown_opcode_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "1101,1,1,0,42");
    intcode()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("unknown opcode in word 42"));
}

#[test]
fn run_step_limit_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "1105,1,0");
    intcode()
        .args(["run", path.to_str().unwrap(), "--max-steps", "50"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("step limit of 50"));
}

#[test]
fn run_invalid_program_text_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "1,2,banana");
    intcode()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid program"));
}

#[test]
fn run_missing_file_exits_1() {
    intcode()
        .args(["run", "/nonexistent/program.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_without_file_exits_1() {
    intcode()
        .arg("run")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("requires a program file"));
}

#[test]
fn run_unknown_flag_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "99");
    intcode()
        .args(["run", path.to_str().unwrap(), "--turbo"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown flag"));
}

#[test]
fn run_non_integer_stdin_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, EQUALS_EIGHT);
    intcode()
        .args(["run", path.to_str().unwrap()])
        .write_stdin("eight\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("'eight' is not a valid integer"));
}

#[test]
fn run_reads_far_address_without_limit() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "4,20000000,99");
    intcode()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn run_max_memory_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "4,20000000,99");
    intcode()
        .args(["run", path.to_str().unwrap(), "--max-memory", "1000"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("exceeds memory limit of 1000 cells"));
}

#[test]
fn run_rejects_circuit_flags() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "99");
    intcode()
        .args(["run", path.to_str().unwrap(), "--phases", "1,2"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--phases is not valid for run"));
}

// ---- Chain ----

#[test]
fn chain_serial() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, SERIAL);
    intcode()
        .args(["chain", path.to_str().unwrap(), "--phases", "4,3,2,1,0"])
        .assert()
        .success()
        .stdout("43210\n");
}

#[test]
fn chain_feedback() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, FEEDBACK);
    intcode()
        .args([
            "chain",
            path.to_str().unwrap(),
            "--phases",
            "9,8,7,6,5",
            "--feedback",
        ])
        .assert()
        .success()
        .stdout("139629729\n");
}

#[test]
fn chain_requires_phases() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, SERIAL);
    intcode()
        .args(["chain", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("requires --phases"));
}

#[test]
fn chain_stage_failure_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, "3,4,4,0,99");
    intcode()
        .args(["chain", path.to_str().unwrap(), "--phases", "99,42"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("stage 1"));
}

// ---- Tune ----

#[test]
fn tune_serial_default_phases() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, SERIAL);
    intcode()
        .args(["tune", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("4,3,2,1,0 -> 43210\n");
}

#[test]
fn tune_feedback_default_phases() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, FEEDBACK);
    intcode()
        .args(["tune", path.to_str().unwrap(), "--feedback"])
        .assert()
        .success()
        .stdout("9,8,7,6,5 -> 139629729\n");
}

#[test]
fn tune_too_many_phases_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, SERIAL);
    intcode()
        .args(["tune", path.to_str().unwrap(), "--phases", "0,1,2,3,4,5,6,7,8"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("search maximum"));
}

#[test]
fn tune_rejects_input_flag() {
    let dir = TempDir::new().unwrap();
    let path = write_program(&dir, SERIAL);
    intcode()
        .args(["tune", path.to_str().unwrap(), "--input", "5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--input is not valid for tune"));
}
