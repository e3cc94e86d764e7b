// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client error taxonomy.

use thiserror::Error;

/// Errors surfaced by the service clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Caller-supplied input failed a precondition checked before any
    /// I/O. Never retried.
    #[error("{0}")]
    Validation(String),

    /// The remote service responded with a non-success status or a
    /// body that did not parse.
    #[error("upstream responded {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Every pack-lookup fallback strategy was exhausted.
    #[error("no capability pack found for {key}@{version}")]
    Resolution { key: String, version: String },

    /// The request never produced a response (connect, timeout, DNS).
    #[error("transport: {0}")]
    Transport(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Upstream { status: 404, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ClientError::Upstream { status: status.as_u16(), body: e.to_string() },
            None => ClientError::Transport(e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
