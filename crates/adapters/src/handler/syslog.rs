// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local syslog handler.
//!
//! Writes one RFC 3164 style datagram per failure to the first local syslog
//! socket that accepts it:
//!
//! ```text
//! <11>Mar  4 09:26:53 failhook[4242]: backup failed with 2
//! ```
//!
//! Priority 11 is `LOG_ERR` in the `LOG_USER` facility.

use super::{FailureHandler, HandlerError};
use crate::env;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use failhook_core::PlaceholderRegistry;
use std::io;
use std::path::PathBuf;
use tokio::net::UnixDatagram;

const LOG_USER: u8 = 1 << 3;
const LOG_ERR: u8 = 3;
const TAG: &str = "failhook";

/// Sends a message to the local syslog daemon on failure.
#[derive(Debug, Clone)]
pub struct SyslogHandler {
    message: String,
    sockets: Vec<PathBuf>,
    registry: PlaceholderRegistry,
}

impl SyslogHandler {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sockets: env::syslog_sockets(),
            registry: PlaceholderRegistry::new(),
        }
    }

    /// Write to `path` only, instead of the default socket list.
    pub fn socket(mut self, path: impl Into<PathBuf>) -> Self {
        self.sockets = vec![path.into()];
        self
    }

    pub fn with_registry(mut self, registry: PlaceholderRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry_mut(&mut self) -> &mut PlaceholderRegistry {
        &mut self.registry
    }

    async fn send(&self, entry: &[u8]) -> io::Result<PathBuf> {
        let socket = UnixDatagram::unbound()?;
        let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no syslog socket configured");
        for path in &self.sockets {
            match socket.send_to(entry, path).await {
                Ok(_) => return Ok(path.clone()),
                Err(e) => {
                    tracing::trace!(path = %path.display(), error = %e, "syslog socket rejected");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}

/// Format a syslog entry the way local syslog daemons expect it.
pub fn format_entry<Tz: TimeZone>(at: &DateTime<Tz>, pid: u32, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let newline = if message.ends_with('\n') { "" } else { "\n" };
    format!(
        "<{}>{} {}[{}]: {}{}",
        LOG_USER | LOG_ERR,
        at.format("%b %e %H:%M:%S"),
        TAG,
        pid,
        message,
        newline
    )
}

#[async_trait]
impl FailureHandler for SyslogHandler {
    async fn handle(&self, exit_code: i32, output: &str) -> Result<(), HandlerError> {
        let message = self.registry.replace(&self.message, exit_code, output);
        let entry = format_entry(&Local::now(), std::process::id(), &message);

        let path = self.send(entry.as_bytes()).await.map_err(HandlerError::Syslog)?;
        tracing::debug!(path = %path.display(), "wrote syslog entry");
        Ok(())
    }

    fn description(&self) -> String {
        format!("Send to syslog: {}", self.message)
    }
}

#[cfg(test)]
#[path = "syslog_tests.rs"]
mod tests;
