// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-service and artifact-service client.
//!
//! Workspace CRUD goes to the workspace service; the consolidated doc,
//! raw artifact reads, and registry kind lookups go to the artifact
//! service.

use async_trait::async_trait;
use rv_core::workspace::RawWorkspace;
use rv_core::{Workspace, WorkspaceDoc, WorkspaceId};
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::error::ClientError;
use crate::http::{query, urlencode, Http};
use crate::traits::WorkspaceDirectory;

/// `artifact:get` result: the record plus its ETag when the service
/// sent one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactRead {
    pub data: Value,
    pub etag: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WorkspaceClient {
    http: Http,
    workspace_base: String,
    artifact_base: String,
}

impl WorkspaceClient {
    pub fn new(http: Http, config: &ServiceConfig) -> Self {
        Self {
            http,
            workspace_base: config.workspace_base.clone(),
            artifact_base: config.artifact_base.clone(),
        }
    }

    fn normalize(value: Value) -> Result<Workspace, ClientError> {
        let raw: RawWorkspace = serde_json::from_value(value.clone())
            .map_err(|_| ClientError::Upstream { status: 200, body: value.to_string() })?;
        Workspace::try_from(raw)
            .map_err(|e| ClientError::Upstream { status: 200, body: e.to_string() })
    }

    pub async fn list(&self) -> Result<Vec<Workspace>, ClientError> {
        let url = format!("{}/workspace/", self.workspace_base);
        let value = self.http.get(&url).await?;
        let raws = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            other => {
                return Err(ClientError::Upstream { status: 200, body: other.to_string() });
            }
        };
        raws.into_iter().map(Self::normalize).collect()
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        created_by: Option<&str>,
    ) -> Result<Workspace, ClientError> {
        let url = format!("{}/workspace/", self.workspace_base);
        let body = serde_json::json!({
            "name": name,
            "description": description,
            "created_by": created_by,
        });
        Self::normalize(self.http.post_json(&url, &body).await?)
    }

    pub async fn get(&self, id: &WorkspaceId) -> Result<Workspace, ClientError> {
        let url = format!("{}/workspace/{}", self.workspace_base, urlencode(id.as_str()));
        Self::normalize(self.http.get(&url).await?)
    }

    pub async fn update(&self, id: &WorkspaceId, patch: &Value) -> Result<Workspace, ClientError> {
        let url = format!("{}/workspace/{}", self.workspace_base, urlencode(id.as_str()));
        Self::normalize(self.http.put_json(&url, patch).await?)
    }

    pub async fn get_artifact(
        &self,
        workspace_id: &WorkspaceId,
        artifact_id: &str,
    ) -> Result<ArtifactRead, ClientError> {
        let url = format!(
            "{}/artifact/{}/{}",
            self.artifact_base,
            urlencode(workspace_id.as_str()),
            urlencode(artifact_id),
        );
        let (data, etag) = self.http.get_with_etag(&url).await?;
        Ok(ArtifactRead { data, etag })
    }

    pub async fn head_artifact(
        &self,
        workspace_id: &WorkspaceId,
        artifact_id: &str,
    ) -> Result<Option<String>, ClientError> {
        let url = format!(
            "{}/artifact/{}/{}",
            self.artifact_base,
            urlencode(workspace_id.as_str()),
            urlencode(artifact_id),
        );
        self.http.head_etag(&url).await
    }

    pub async fn artifact_history(
        &self,
        workspace_id: &WorkspaceId,
        artifact_id: &str,
    ) -> Result<Value, ClientError> {
        let url = format!(
            "{}/artifact/{}/{}/history",
            self.artifact_base,
            urlencode(workspace_id.as_str()),
            urlencode(artifact_id),
        );
        self.http.get(&url).await
    }

    pub async fn registry_kinds_list(&self, limit: u64, offset: u64) -> Result<Value, ClientError> {
        let q = query(&[
            ("limit", Some(limit.to_string())),
            ("offset", Some(offset.to_string())),
        ]);
        let url = format!("{}/registry/kinds{}", self.artifact_base, q);
        self.http.get(&url).await
    }

    pub async fn registry_kind_get(&self, key: &str) -> Result<Value, ClientError> {
        let url = format!("{}/registry/kinds/{}", self.artifact_base, urlencode(key));
        self.http.get(&url).await
    }
}

#[async_trait]
impl WorkspaceDirectory for WorkspaceClient {
    async fn get_doc(&self, id: &WorkspaceId) -> Result<WorkspaceDoc, ClientError> {
        let url = format!(
            "{}/artifact/{}/parent?include_deleted=false",
            self.artifact_base,
            urlencode(id.as_str()),
        );
        let value = self.http.get(&url).await?;
        serde_json::from_value(value.clone()).map_err(|_| ClientError::Upstream {
            status: 200,
            body: value.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
