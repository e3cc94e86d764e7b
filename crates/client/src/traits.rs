// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trait seams between the store and the service clients.

use async_trait::async_trait;
use rv_core::{PackId, ResolvedPack, Run, RunId, StartRunRequest, WorkspaceDoc, WorkspaceId};

use crate::error::ClientError;

/// Pagination window for list calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Run-management service operations. Stateless per call; `start` is
/// the only non-idempotent one and is never retried here.
#[async_trait]
pub trait RunDirectory: Send + Sync {
    /// Start a new run. `body.workspace_id` must be non-empty; checked
    /// before any I/O. The returned run may be partial.
    async fn start(&self, body: &StartRunRequest) -> Result<Run, ClientError>;

    /// Runs for a workspace, in the order the service returns them.
    async fn list(&self, workspace_id: &WorkspaceId, page: Page) -> Result<Vec<Run>, ClientError>;

    /// Full run snapshot, including diff payloads when present.
    async fn get(&self, run_id: &RunId) -> Result<Run, ClientError>;

    async fn delete(&self, run_id: &RunId) -> Result<(), ClientError>;
}

/// Capability pack lookup.
#[async_trait]
pub trait PackResolver: Send + Sync {
    /// Resolve by key+version through the fallback chain; fails with
    /// [`ClientError::Resolution`] only when every strategy is
    /// exhausted.
    async fn resolve_by_key_version(
        &self,
        key: &str,
        version: &str,
    ) -> Result<ResolvedPack, ClientError>;

    /// Direct pack fetch, preferring the resolved view when asked.
    async fn get_pack(&self, pack_id: &PackId, resolved: bool)
        -> Result<ResolvedPack, ClientError>;
}

/// Workspace header + artifact document reads.
#[async_trait]
pub trait WorkspaceDirectory: Send + Sync {
    async fn get_doc(&self, id: &WorkspaceId) -> Result<WorkspaceDoc, ClientError>;
}
