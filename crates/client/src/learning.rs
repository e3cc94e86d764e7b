// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Learning-service client: start/list/get/delete runs.

use async_trait::async_trait;
use rv_core::{Run, RunId, StartRunRequest, WorkspaceId};

use crate::config::ServiceConfig;
use crate::error::ClientError;
use crate::http::{query, urlencode, Http};
use crate::traits::{Page, RunDirectory};

#[derive(Debug, Clone)]
pub struct LearningClient {
    http: Http,
    base: String,
}

impl LearningClient {
    pub fn new(http: Http, config: &ServiceConfig) -> Self {
        Self { http, base: config.learning_base.clone() }
    }
}

#[async_trait]
impl RunDirectory for LearningClient {
    async fn start(&self, body: &StartRunRequest) -> Result<Run, ClientError> {
        if body.workspace_id.is_empty() {
            return Err(ClientError::Validation("workspace_id is required".to_string()));
        }
        let url = format!("{}/runs", self.base);
        let value = self.http.post_json(&url, body).await?;
        tracing::info!(workspace_id = %body.workspace_id, playbook_id = %body.playbook_id, "run started");
        if value.is_null() {
            // Some service versions reply 200 with an empty body.
            return Ok(Run::default());
        }
        serde_json::from_value(value.clone()).map_err(|_| ClientError::Upstream {
            status: 200,
            body: value.to_string(),
        })
    }

    async fn list(&self, workspace_id: &WorkspaceId, page: Page) -> Result<Vec<Run>, ClientError> {
        let q = query(&[
            ("workspace_id", Some(workspace_id.to_string())),
            ("limit", page.limit.map(|v| v.to_string())),
            ("offset", page.offset.map(|v| v.to_string())),
        ]);
        let url = format!("{}/runs{}", self.base, q);
        let value = self.http.get(&url).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value.clone()).map_err(|_| ClientError::Upstream {
            status: 200,
            body: value.to_string(),
        })
    }

    async fn get(&self, run_id: &RunId) -> Result<Run, ClientError> {
        let url = format!("{}/runs/{}", self.base, urlencode(run_id.as_str()));
        let value = self.http.get(&url).await?;
        serde_json::from_value(value.clone()).map_err(|_| ClientError::Upstream {
            status: 200,
            body: value.to_string(),
        })
    }

    async fn delete(&self, run_id: &RunId) -> Result<(), ClientError> {
        let url = format!("{}/runs/{}", self.base, urlencode(run_id.as_str()));
        self.http.delete(&url).await?;
        tracing::info!(%run_id, "run deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "learning_tests.rs"]
mod tests;
