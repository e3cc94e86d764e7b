// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service base URLs.
//!
//! Defaults match the local dev topology: each backend service on its
//! own loopback port.

use serde::Deserialize;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// workspace-service
    pub workspace_base: String,
    /// artifact-service (registry + artifacts)
    pub artifact_base: String,
    /// capability-service (packs)
    pub capability_base: String,
    /// learning-service (runs)
    pub learning_base: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            workspace_base: "http://127.0.0.1:8010".to_string(),
            artifact_base: "http://localhost:9011".to_string(),
            capability_base: "http://localhost:9012".to_string(),
            learning_base: "http://localhost:9013".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn from_toml(text: &str) -> Result<Self, ClientError> {
        toml::from_str(text).map_err(|e| ClientError::Validation(format!("bad config: {e}")))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
