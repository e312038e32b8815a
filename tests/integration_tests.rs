use assert_cmd::Command;
use predicates::str::{contains, diff, is_empty};

fn ls8() -> Command {
    Command::cargo_bin("ls8").unwrap()
}

#[test]
fn runs_mult() {
    let mut cmd = ls8();
    cmd.arg("tests/files/mult.ls8").arg("--minimal");

    cmd.assert().success().stdout(diff("72\n")).stderr(is_empty());
}

#[test]
fn runs_subroutines() {
    let mut cmd = ls8();
    cmd.arg("tests/files/call.ls8").arg("--minimal");

    cmd.assert().success().stdout(diff("20\n30\n36\n60\n"));
}

#[test]
fn runs_stack() {
    let mut cmd = ls8();
    cmd.arg("tests/files/stack.ls8").arg("--minimal");

    cmd.assert().success().stdout(diff("3\n2\n1\n"));
}

#[test]
fn runs_compare_and_jump() {
    let mut cmd = ls8();
    cmd.arg("tests/files/cmp.ls8").arg("--minimal");

    cmd.assert().success().stdout(diff("1\n"));
}

#[test]
fn status_messages_go_to_stderr() {
    let mut cmd = ls8();
    cmd.arg("tests/files/mult.ls8");

    cmd.assert()
        .success()
        .stdout(diff("72\n"))
        .stderr(contains("Running"))
        .stderr(contains("Halted"));
}

#[test]
fn missing_argument_prints_usage() {
    let mut cmd = ls8();
    cmd.assert().code(1).stderr(contains("Usage"));
}

#[test]
fn extra_argument_prints_usage() {
    let mut cmd = ls8();
    cmd.arg("tests/files/mult.ls8").arg("tests/files/call.ls8");

    cmd.assert()
        .code(1)
        .stdout(is_empty())
        .stderr(contains("Usage"));
}

#[test]
fn missing_file() {
    let mut cmd = ls8();
    cmd.arg("tests/files/nothing_here.ls8").arg("--minimal");

    cmd.assert().code(2).stderr(contains("not found"));
}

#[test]
fn bad_literal_is_not_run() {
    let mut cmd = ls8();
    cmd.arg("tests/files/bad_literal.ls8").arg("--minimal");

    cmd.assert()
        .code(3)
        .stdout(is_empty())
        .stderr(contains("Invalid binary digit `O`"));
}

#[test]
fn unsupported_opcode() {
    let mut cmd = ls8();
    cmd.arg("tests/files/bad_opcode.ls8").arg("--minimal");

    cmd.assert()
        .code(4)
        .stdout(is_empty())
        .stderr(contains("Unsupported opcode 0b11111111 at 0x03"));
}

#[test]
fn register_out_of_bounds() {
    let mut cmd = ls8();
    cmd.arg("tests/files/bad_register.ls8").arg("--minimal");

    cmd.assert()
        .code(5)
        .stderr(contains("Register R9 does not exist"));
}

#[test]
fn traces_with_flag() {
    let mut cmd = ls8();
    cmd.arg("tests/files/mult.ls8").arg("--minimal").arg("--trace");

    cmd.assert()
        .success()
        .stdout(diff("72\n"))
        .stderr(contains("TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4"))
        .stderr(contains("TRACE: 0B | 01 00 00 | 48 09 00 00 00 00 00 F4"));
}

#[test]
fn traces_with_env() {
    let mut cmd = ls8();
    cmd.arg("tests/files/mult.ls8")
        .arg("--minimal")
        .env("LS8_TRACE", "1");

    cmd.assert()
        .success()
        .stderr(contains("TRACE: 09 | 47 00 01 | 48 09 00 00 00 00 00 F4"));
}

#[test]
fn env_trace_needs_exact_value() {
    let mut cmd = ls8();
    cmd.arg("tests/files/mult.ls8")
        .arg("--minimal")
        .env("LS8_TRACE", "0");

    cmd.assert().success().stdout(diff("72\n")).stderr(is_empty());
}
