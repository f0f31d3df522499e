// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Usage and argument error specs

use crate::prelude::*;

const MISSING_COMMAND: &str = "Error: Monitored command must be specified after --";

#[test]
fn no_arguments_prints_usage_and_error() {
    cli()
        .exits_with(1)
        .stderr_has("Usage: failhook [OPTIONS] -- <command> [args...]")
        .stderr_has(MISSING_COMMAND);
}

#[test]
fn flags_without_separator_are_rejected() {
    cli()
        .args(&["-c", "echo failed", "make"])
        .exits_with(1)
        .stderr_has(MISSING_COMMAND);
}

#[test]
fn separator_without_command_is_rejected() {
    cli()
        .args(&["-d", "--"])
        .exits_with(1)
        .stderr_has(MISSING_COMMAND)
        .stderr_lacks("added handler");
}

#[test]
fn unknown_flag_prints_error_and_usage() {
    cli()
        .args(&["--bogus", "--", "true"])
        .exits_with(1)
        .stderr_has("Error: unexpected argument '--bogus'")
        .stderr_has("Options:");
}

#[test]
fn invalid_timeout_is_rejected_before_running() {
    let scratch = Scratch::new();
    let marker = scratch.path_str("ran");
    cli()
        .args(&["-timeout", "soon", "--", "touch", &marker])
        .exits_with(1)
        .stderr_has("soon");
    assert!(!scratch.path("ran").exists());
}

#[test]
fn help_prints_usage_to_stdout() {
    cli()
        .args(&["-h"])
        .passes()
        .stdout_has("Usage: failhook")
        .stdout_has("Placeholders:")
        .stdout_has("Examples:");
}

#[test]
fn help_wins_over_the_monitored_command() {
    let scratch = Scratch::new();
    let marker = scratch.path_str("ran");
    cli()
        .args(&["--help", "--", "touch", &marker])
        .passes()
        .stdout_has("-slack-webhook <url>");
    assert!(!scratch.path("ran").exists());
}
