// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Usage text.

use failhook_adapters::DEFAULT_SLACK_USERNAME;
use failhook_core::placeholder::{DATE, OUTPUT, STATUS_CODE, TIME, TIMESTAMP};

use crate::args::DEFAULT_SLACK_MESSAGE;

pub fn usage() -> String {
    format!(
        "\
failhook: run a command and act when it fails

Usage: failhook [OPTIONS] -- <command> [args...]

Options:
  -c <cmd>                Shell command to run on failure
  -w <url>                Webhook URL to call (GET) on failure
  -s <msg>                Message to send to syslog on failure
  -slack-webhook <url>    Slack incoming webhook URL
  -slack-msg <msg>        Slack message (default: \"{slack_msg}\")
  -slack-channel <name>   Slack channel override
  -slack-username <name>  Slack username (default: \"{slack_user}\")
  -timeout <seconds>      Kill the command after this many seconds (0 = none)
  -d                      Print debug information
  -h                      Show this help

Placeholders:
  {STATUS_CODE}  Exit code of the failed command
  {OUTPUT}       Combined stdout and stderr of the command
  {TIMESTAMP}    Current time, RFC 3339
  {DATE}         Current date, YYYY-MM-DD
  {TIME}         Current time, HH:MM:SS

Examples:
  failhook -c \"echo 'exit {STATUS_CODE}' >> failures.log\" -- make test
  failhook -w \"https://example.com/alert?code={STATUS_CODE}&output={OUTPUT}\" -- ./backup.sh
  failhook -s \"backup failed: {OUTPUT}\" -timeout 3600 -- ./backup.sh
  failhook -slack-webhook https://hooks.slack.com/services/T000/B000/XXXX -- cargo test
",
        slack_msg = DEFAULT_SLACK_MESSAGE.escape_debug(),
        slack_user = DEFAULT_SLACK_USERNAME,
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
