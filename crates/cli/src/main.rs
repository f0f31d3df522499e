// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! failhook: run a command and act when it fails.

mod args;
mod help;
mod logging;
mod signals;

use anyhow::{Context, Result};
use failhook_adapters::{CommandHandler, SlackHandler, SyslogHandler, WebhookHandler};
use failhook_core::RunContext;
use failhook_engine::Supervisor;

use crate::args::{Config, Invocation};

#[tokio::main]
async fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let config = match args::parse(&argv) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            print!("{}", help::usage());
            return;
        }
        Err(e) => {
            eprint!("{}", help::usage());
            eprintln!();
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    logging::setup_logging(config.debug);

    match run(config).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Supervise the monitored command and return the exit code to report.
async fn run(config: Config) -> Result<i32> {
    let ctx = RunContext::with_optional_timeout(config.timeout);
    signals::cancel_on_signal(ctx.clone()).context("failed to install signal handlers")?;

    let mut supervisor = build_supervisor(&config);
    let outcome = supervisor
        .run(&ctx, &config.program, &config.program_args)
        .await;
    Ok(outcome.exit_code)
}

/// Register handlers in a fixed order: command, webhook, syslog, Slack.
fn build_supervisor(config: &Config) -> Supervisor {
    let mut supervisor = Supervisor::new(config.debug);
    if let Some(command) = &config.command {
        supervisor.add_handler(CommandHandler::new(command));
    }
    if let Some(url) = &config.webhook_url {
        supervisor.add_handler(WebhookHandler::new(url));
    }
    if let Some(message) = &config.syslog_message {
        supervisor.add_handler(SyslogHandler::new(message));
    }
    if let Some(slack) = &config.slack {
        supervisor.add_handler(
            SlackHandler::new(&slack.webhook_url, &slack.message)
                .channel(&slack.channel)
                .username(&slack.username),
        );
    }
    supervisor
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
