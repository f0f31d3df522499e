// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command line parsing.
//!
//! Everything before the first literal `--` is a failhook flag; everything
//! after it is the monitored command. Long flags are accepted with one or
//! two leading dashes (`-timeout 5`, `--timeout=5`) and are rewritten into
//! clap's spelling before parsing.

use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};
use failhook_adapters::DEFAULT_SLACK_USERNAME;

/// Slack text used when `-slack-msg` is not given.
pub const DEFAULT_SLACK_MESSAGE: &str =
    "Command failed with exit code __STATUS_CODE__\n```\n__OUTPUT__\n```";

const SEPARATOR: &str = "--";

const LONG_FLAGS: &[&str] = &[
    "slack-webhook",
    "slack-msg",
    "slack-channel",
    "slack-username",
    "timeout",
    "help",
];
const SHORT_FLAGS: &[&str] = &["c", "w", "s", "d", "h"];
const VALUE_FLAGS: &[&str] = &[
    "c",
    "w",
    "s",
    "slack-webhook",
    "slack-msg",
    "slack-channel",
    "slack-username",
    "timeout",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("Monitored command must be specified after --")]
    MissingCommand,

    #[error("{0}")]
    Flags(String),
}

impl From<clap::Error> for ArgsError {
    fn from(e: clap::Error) -> Self {
        let rendered = e.to_string();
        let first = rendered.lines().next().unwrap_or_default();
        Self::Flags(first.trim_start_matches("error: ").to_string())
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(Config),
}

/// Slack settings, present only when a webhook URL was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackConfig {
    pub webhook_url: String,
    pub message: String,
    pub channel: String,
    pub username: String,
}

/// A fully parsed run request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Option<String>,
    pub webhook_url: Option<String>,
    pub syslog_message: Option<String>,
    pub slack: Option<SlackConfig>,
    /// Zero means no timeout.
    pub timeout: Duration,
    pub debug: bool,
    pub program: String,
    pub program_args: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "failhook",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true,
    color = ColorChoice::Never
)]
struct Flags {
    #[arg(short = 'c', value_name = "CMD", allow_hyphen_values = true)]
    command: Option<String>,

    #[arg(short = 'w', value_name = "URL", allow_hyphen_values = true)]
    webhook: Option<String>,

    #[arg(short = 's', value_name = "MSG", allow_hyphen_values = true)]
    syslog: Option<String>,

    #[arg(long = "slack-webhook", value_name = "URL", allow_hyphen_values = true)]
    slack_webhook: Option<String>,

    #[arg(
        long = "slack-msg",
        value_name = "MSG",
        allow_hyphen_values = true,
        default_value = DEFAULT_SLACK_MESSAGE
    )]
    slack_msg: String,

    #[arg(
        long = "slack-channel",
        value_name = "CHANNEL",
        allow_hyphen_values = true,
        default_value = ""
    )]
    slack_channel: String,

    #[arg(
        long = "slack-username",
        value_name = "NAME",
        allow_hyphen_values = true,
        default_value = DEFAULT_SLACK_USERNAME
    )]
    slack_username: String,

    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 0)]
    timeout: u64,

    /// Bare `-d` or `-d=<bool>`.
    #[arg(
        short = 'd',
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        action = ArgAction::Set
    )]
    debug: bool,

    #[arg(short = 'h', long = "help")]
    help: bool,
}

impl Flags {
    fn into_config(self, program: String, program_args: Vec<String>) -> Config {
        let slack = non_empty(self.slack_webhook).map(|webhook_url| SlackConfig {
            webhook_url,
            message: self.slack_msg,
            channel: self.slack_channel,
            username: self.slack_username,
        });
        Config {
            command: non_empty(self.command),
            webhook_url: non_empty(self.webhook),
            syslog_message: non_empty(self.syslog),
            slack,
            timeout: Duration::from_secs(self.timeout),
            debug: self.debug,
            program,
            program_args,
        }
    }
}

/// Parse a full argv (program name first).
///
/// Flag errors take precedence over a missing command only when the
/// separator is present; without `--` the missing command is reported.
pub fn parse(argv: &[String]) -> Result<Invocation, ArgsError> {
    let rest = argv.get(1..).unwrap_or_default();
    let (flag_args, monitored) = match rest.iter().position(|a| a == SEPARATOR) {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };

    let cli_args = std::iter::once("failhook".to_string()).chain(normalize(flag_args));
    let flags = match Flags::try_parse_from(cli_args) {
        Ok(flags) => flags,
        Err(_) if monitored.is_none() => return Err(ArgsError::MissingCommand),
        Err(e) => return Err(e.into()),
    };

    if flags.help {
        return Ok(Invocation::Help);
    }

    let Some((program, program_args)) = monitored.and_then(|m| m.split_first()) else {
        return Err(ArgsError::MissingCommand);
    };
    Ok(Invocation::Run(
        flags.into_config(program.clone(), program_args.to_vec()),
    ))
}

/// Rewrite flag spellings into clap's. Values are passed through untouched,
/// even when they look like flags.
fn normalize(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut value_next = false;
    for arg in args {
        if value_next {
            value_next = false;
            out.push(arg.clone());
            continue;
        }
        match respell(arg) {
            Some((spelled, name, inline_value)) => {
                value_next = VALUE_FLAGS.contains(&name) && !inline_value;
                out.push(spelled);
            }
            None => out.push(arg.clone()),
        }
    }
    out
}

fn respell(arg: &str) -> Option<(String, &str, bool)> {
    let body = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    let (name, inline_value) = match body.split_once('=') {
        Some((name, _)) => (name, true),
        None => (body, false),
    };
    let spelled = if LONG_FLAGS.contains(&name) {
        format!("--{body}")
    } else if SHORT_FLAGS.contains(&name) {
        format!("-{body}")
    } else {
        return None;
    };
    Some((spelled, name, inline_value))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
