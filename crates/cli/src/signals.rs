// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interrupt handling.

use failhook_core::RunContext;
use tokio::signal::unix::{signal, SignalKind};

/// Cancel `ctx` on the first SIGINT or SIGTERM.
///
/// Handlers are registered before this returns, so a signal arriving while
/// the monitored command starts is not lost.
pub fn cancel_on_signal(ctx: RunContext) -> std::io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        };
        tracing::debug!(signal = name, "received interrupt signal, canceling command");
        ctx.cancel();
    });
    Ok(())
}
