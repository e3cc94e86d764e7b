// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live-channel tuning knobs.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("bad stream config: {0}")]
pub struct ConfigError(String);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Push-notification endpoint.
    pub url: String,
    /// First reconnect delay; doubles per failed attempt.
    pub reconnect_base_delay_ms: u64,
    /// Cap on the pre-jitter reconnect delay.
    pub reconnect_max_delay_ms: u64,
    /// Ping cadence while connected.
    pub heartbeat_interval_ms: u64,
    /// A ping unanswered for this long forces a teardown.
    pub idle_timeout_ms: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:9013/notifications".to_string(),
            reconnect_base_delay_ms: 1000,
            reconnect_max_delay_ms: 15_000,
            heartbeat_interval_ms: 15_000,
            idle_timeout_ms: 20_000,
        }
    }
}

impl StreamConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError(e.to_string()))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
