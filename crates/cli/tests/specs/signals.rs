// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interrupt specs
//!
//! The signal goes to failhook only, so the monitored command is stopped by
//! failhook itself rather than by the signal.

use std::process::{Command, Stdio};

use serial_test::serial;

use crate::prelude::*;

fn interrupt_run(signal: &str) {
    let scratch = Scratch::new();
    let report = scratch.path_str("report");
    let started = scratch.path_str("started");

    let mut child = cli()
        .args(&[
            "-c",
            &format!("echo '__STATUS_CODE__ __OUTPUT__' > {report}"),
            "--",
            "sh",
            "-c",
            &format!("touch {started}; sleep 30"),
        ])
        .command()
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    assert!(
        wait_for(|| scratch.path("started").exists()),
        "monitored command never started"
    );

    let status = Command::new("kill")
        .args([&format!("-{signal}"), &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(130), "stderr: {stderr}");
    assert!(stderr.contains("Command was interrupted"), "stderr: {stderr}");
    assert_eq!(scratch.read("report"), "130 Command was interrupted\n");
}

#[test]
#[serial]
fn sigint_exits_130_after_handlers() {
    interrupt_run("INT");
}

#[test]
#[serial]
fn sigterm_exits_130_after_handlers() {
    interrupt_run("TERM");
}
