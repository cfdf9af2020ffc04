//! Process-level behavior of the `pnmconv` binary: stdout bytes, stderr status line, exit code.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn pnmconv(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pnmconv"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // Dropping the handle closes stdin so the binary sees end of stream.
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

// ── success ──────────────────────────────────────────────────────────

#[test]
fn convert_reports_success() {
    let out = pnmconv(&["--convert"], b"P1 2 2\n0 1\n1 0\n");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"P4 2 2\n\x7f\xbf");
    assert_eq!(out.stderr, b"Successful conversion!\n");
}

#[test]
fn downsample_reports_success() {
    let out = pnmconv(&["-d"], b"P5 2 1 255\n\x00\xff");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"P4 2 1\n\xbf");
    assert_eq!(out.stderr, b"Successful conversion!\n");
}

#[test]
fn quiet_suppresses_success_line() {
    let out = pnmconv(&["--convert", "--quiet"], b"P1 2 2\n0 1\n1 0\n");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"P4 2 2\n\x7f\xbf");
    assert!(out.stderr.is_empty());
}

// ── failure ──────────────────────────────────────────────────────────

#[test]
fn malformed_header_is_input_error() {
    let out = pnmconv(&["--convert"], b"P9 1 1 255\n0\n");
    assert!(!out.status.success());
    assert_eq!(out.stderr, b"Input error!\n");
}

#[test]
fn truncated_data_is_input_error() {
    let out = pnmconv(&["--convert"], b"P5 2 2 255\n\x01");
    assert!(!out.status.success());
    assert_eq!(out.stderr, b"Input error!\n");
}

#[test]
fn both_modes_is_input_error() {
    let out = pnmconv(&["-d", "-c"], b"P1 1 1\n0\n");
    assert!(!out.status.success());
    assert_eq!(out.stderr, b"Input error!\n");
    assert!(out.stdout.is_empty());
}

#[test]
fn no_mode_is_input_error() {
    let out = pnmconv(&[], b"P1 1 1\n0\n");
    assert!(!out.status.success());
    assert_eq!(out.stderr, b"Input error!\n");
    assert!(out.stdout.is_empty());
}
