// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::path::PathBuf;

/// Local syslog sockets tried in order when no override is set.
const DEFAULT_SYSLOG_SOCKETS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

/// Syslog socket candidates: FAILHOOK_SYSLOG_SOCKET > the platform defaults.
pub fn syslog_sockets() -> Vec<PathBuf> {
    match std::env::var_os("FAILHOOK_SYSLOG_SOCKET") {
        Some(path) if !path.is_empty() => vec![PathBuf::from(path)],
        _ => DEFAULT_SYSLOG_SOCKETS.iter().map(PathBuf::from).collect(),
    }
}
