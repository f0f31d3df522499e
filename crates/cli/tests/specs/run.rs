// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit code and supervision specs

use crate::prelude::*;

#[test]
fn successful_command_exits_zero_quietly() {
    let scratch = Scratch::new();
    let marker = scratch.path_str("handler-ran");
    cli()
        .args(&["-c", &format!("touch {marker}"), "--", "true"])
        .passes()
        .stdout_eq("")
        .stderr_lacks("ERROR");
    assert!(!scratch.path("handler-ran").exists());
}

#[test]
fn exit_code_passes_through() {
    cli().args(&["--", "sh", "-c", "exit 42"]).exits_with(42);
}

#[test]
fn monitored_output_is_captured_not_echoed() {
    cli()
        .args(&["--", "sh", "-c", "echo captured-line; exit 3"])
        .exits_with(3)
        .stdout_lacks("captured-line");
}

#[test]
fn missing_program_exits_one() {
    cli()
        .args(&["--", "/nonexistent/failhook-spec-binary"])
        .exits_with(1);
}

#[test]
fn timeout_reports_124_to_handlers() {
    let scratch = Scratch::new();
    let report = scratch.path_str("report");
    let started = std::time::Instant::now();
    cli()
        .args(&[
            "-timeout",
            "1",
            "-c",
            &format!("echo '__STATUS_CODE__ __OUTPUT__' > {report}"),
            "--",
            "sleep",
            "30",
        ])
        .exits_with(124)
        .stderr_has("Command timed out after 1 seconds");
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
    assert_eq!(
        scratch.read("report"),
        "124 Command timed out after 1 seconds\n"
    );
}

#[test]
fn zero_timeout_means_unbounded() {
    cli()
        .args(&["-timeout", "0", "--", "sh", "-c", "sleep 1; exit 6"])
        .exits_with(6);
}

#[test]
fn largest_timeout_still_runs_handlers() {
    let scratch = Scratch::new();
    let report = scratch.path_str("report");
    cli()
        .args(&[
            "-timeout",
            "18446744073709551615",
            "-c",
            &format!("echo handled __STATUS_CODE__ > {report}"),
            "--",
            "false",
        ])
        .exits_with(1)
        .stderr_lacks("panicked");
    assert_eq!(scratch.read("report"), "handled 1\n");
}

#[test]
fn debug_accepts_an_explicit_boolean() {
    cli()
        .args(&["-d=false", "-c", "true", "--", "sh", "-c", "exit 2"])
        .exits_with(2)
        .stderr_lacks("added handler");
    cli()
        .args(&["-d=true", "-c", "true", "--", "sh", "-c", "exit 2"])
        .exits_with(2)
        .stderr_has("added handler");
}

#[test]
fn debug_flag_traces_the_run() {
    cli()
        .args(&["-d", "-c", "true", "--", "sh", "-c", "exit 2"])
        .exits_with(2)
        .stderr_has("added handler")
        .stderr_has("running command")
        .stderr_has("command completed")
        .stderr_has("executing handler")
        .stderr_has("Execute command: true");
}

#[test]
fn without_debug_no_traces() {
    cli()
        .args(&["-c", "true", "--", "sh", "-c", "exit 2"])
        .exits_with(2)
        .stderr_lacks("added handler")
        .stderr_lacks("running command");
}
