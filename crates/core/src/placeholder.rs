// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Placeholder substitution for handler templates.
//!
//! A registry maps literal tokens such as `__OUTPUT__` to evaluators of
//! `(exit_code, output)`. Evaluators run at substitution time, so the
//! time-based built-ins reflect the moment a handler fires.
//!
//! Replacement values are never re-scanned for tokens: a value that happens to
//! contain a token is inserted literally. Tokens whose text overlaps another
//! token's text have no defined result.

use crate::clock::{Clock, SystemClock};
use chrono::SecondsFormat;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Exit code of the failed command, in decimal.
pub const STATUS_CODE: &str = "__STATUS_CODE__";
/// Combined stdout and stderr of the failed command.
pub const OUTPUT: &str = "__OUTPUT__";
/// Current time in RFC 3339 format.
pub const TIMESTAMP: &str = "__TIMESTAMP__";
/// Current date (`YYYY-MM-DD`).
pub const DATE: &str = "__DATE__";
/// Current time of day (`HH:MM:SS`).
pub const TIME: &str = "__TIME__";

/// Evaluator producing the replacement text for a token.
pub type PlaceholderFn = Arc<dyn Fn(i32, &str) -> String + Send + Sync>;

/// Token table used by a single handler.
#[derive(Clone)]
pub struct PlaceholderRegistry {
    placeholders: HashMap<String, PlaceholderFn>,
}

impl PlaceholderRegistry {
    /// Registry with the built-in tokens, reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Registry with the built-in tokens, reading time from `clock`.
    pub fn with_clock(clock: impl Clock) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        let mut registry = Self::empty();

        registry.register(STATUS_CODE, |exit_code, _| exit_code.to_string());
        registry.register(OUTPUT, |_, output| output.to_string());

        let c = Arc::clone(&clock);
        registry.register(TIMESTAMP, move |_, _| {
            c.now().to_rfc3339_opts(SecondsFormat::Secs, true)
        });
        let c = Arc::clone(&clock);
        registry.register(DATE, move |_, _| c.now().format("%Y-%m-%d").to_string());
        registry.register(TIME, move |_, _| clock.now().format("%H:%M:%S").to_string());

        registry
    }

    /// Registry with no tokens at all.
    pub fn empty() -> Self {
        Self {
            placeholders: HashMap::new(),
        }
    }

    /// Add a token, replacing any existing evaluator for it.
    pub fn register<F>(&mut self, token: impl Into<String>, f: F)
    where
        F: Fn(i32, &str) -> String + Send + Sync + 'static,
    {
        self.placeholders.insert(token.into(), Arc::new(f));
    }

    /// Whether `token` has an evaluator.
    pub fn contains(&self, token: &str) -> bool {
        self.placeholders.contains_key(token)
    }

    /// Registered tokens, in no particular order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.placeholders.keys().map(String::as_str)
    }

    /// Replace every occurrence of every registered token in `text`.
    pub fn replace(&self, text: &str, exit_code: i32, output: &str) -> String {
        self.substitute(text, exit_code, output, |value| value)
    }

    /// Like [`replace`](Self::replace), but form-encodes each substituted
    /// value (space becomes `+`, reserved characters are percent-escaped).
    ///
    /// The template itself is left untouched, so a URL's scheme, path and
    /// query separators survive as written.
    pub fn replace_url_encoded(&self, text: &str, exit_code: i32, output: &str) -> String {
        self.substitute(text, exit_code, output, |value| {
            form_urlencoded::byte_serialize(value.as_bytes()).collect()
        })
    }

    // Single left-to-right scan: substituted values are never re-scanned, and
    // each token is evaluated at most once per call.
    fn substitute(
        &self,
        text: &str,
        exit_code: i32,
        output: &str,
        encode: impl Fn(String) -> String,
    ) -> String {
        let mut values: HashMap<&str, String> = HashMap::new();
        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some((pos, token, f)) = self.next_token(rest) {
            result.push_str(&rest[..pos]);
            let value = values
                .entry(token)
                .or_insert_with(|| encode(f(exit_code, output)));
            result.push_str(value);
            rest = &rest[pos + token.len()..];
        }
        result.push_str(rest);
        result
    }

    // Earliest token in `text`; the longest one wins when two start together.
    fn next_token(&self, text: &str) -> Option<(usize, &str, &PlaceholderFn)> {
        self.placeholders
            .iter()
            .filter(|(token, _)| !token.is_empty())
            .filter_map(|(token, f)| text.find(token.as_str()).map(|pos| (pos, token.as_str(), f)))
            .min_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.len().cmp(&a.1.len())))
    }
}

impl Default for PlaceholderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlaceholderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<&str> = self.tokens().collect();
        tokens.sort_unstable();
        f.debug_struct("PlaceholderRegistry")
            .field("tokens", &tokens)
            .finish()
    }
}

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;
