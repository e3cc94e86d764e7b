// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request, reply, and push message shapes.

use rv_core::{StartRunRequest, StepEvent, WorkspaceId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reply for unknown token {0}")]
    UnknownToken(String),

    #[error("request dropped before a reply arrived")]
    Dropped,
}

/// One request from the panel to the host. The token correlates the
/// eventual [`HostReply`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostRequest {
    pub token: String,
    #[serde(flatten)]
    pub op: HostOp,
}

fn default_true() -> bool {
    true
}

fn default_kind_limit() -> u64 {
    200
}

/// The operation being requested. Tag strings and payload field casing
/// match the host shell verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum HostOp {
    #[serde(rename = "workspace:list")]
    WorkspaceList,

    #[serde(rename = "workspace:create")]
    WorkspaceCreate {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        created_by: Option<String>,
    },

    #[serde(rename = "workspace:get")]
    WorkspaceGet { id: WorkspaceId },

    #[serde(rename = "workspace:update")]
    WorkspaceUpdate { id: WorkspaceId, patch: Value },

    /// Consolidated workspace header plus artifact collection.
    #[serde(rename = "workspace:getDoc")]
    WorkspaceGetDoc { id: WorkspaceId },

    #[serde(rename = "artifact:get")]
    ArtifactGet {
        #[serde(rename = "workspaceId")]
        workspace_id: WorkspaceId,
        #[serde(rename = "artifactId")]
        artifact_id: String,
    },

    /// ETag-only probe for change detection.
    #[serde(rename = "artifact:head")]
    ArtifactHead {
        #[serde(rename = "workspaceId")]
        workspace_id: WorkspaceId,
        #[serde(rename = "artifactId")]
        artifact_id: String,
    },

    #[serde(rename = "artifact:history")]
    ArtifactHistory {
        #[serde(rename = "workspaceId")]
        workspace_id: WorkspaceId,
        #[serde(rename = "artifactId")]
        artifact_id: String,
    },

    #[serde(rename = "registry:kinds:list")]
    RegistryKindsList {
        #[serde(default = "default_kind_limit")]
        limit: u64,
        #[serde(default)]
        offset: u64,
    },

    #[serde(rename = "registry:kind:get")]
    RegistryKindGet { key: String },

    #[serde(rename = "runs:start")]
    RunsStart {
        #[serde(rename = "requestBody")]
        request_body: StartRunRequest,
    },

    #[serde(rename = "runs:list")]
    RunsList {
        #[serde(rename = "workspaceId")]
        workspace_id: WorkspaceId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<u64>,
    },

    #[serde(rename = "runs:get")]
    RunsGet {
        #[serde(rename = "runId")]
        run_id: String,
    },

    #[serde(rename = "runs:delete")]
    RunsDelete {
        #[serde(rename = "runId")]
        run_id: String,
    },

    /// Pack lookup by id or key+version. The host validates that one of
    /// the two identity forms is present.
    #[serde(rename = "capability:pack:get")]
    CapabilityPackGet {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pack_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        #[serde(default = "default_true")]
        resolved: bool,
    },

    /// Three-step resolved lookup by key+version with fallbacks.
    #[serde(rename = "capability:pack:resolvedByKeyVersion")]
    CapabilityPackResolved { key: String, version: String },
}

/// Reply to one [`HostRequest`], matched by token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostReply {
    pub token: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostReply {
    pub fn ok(token: impl Into<String>, data: Value) -> Self {
        Self { token: token.into(), ok: true, data: Some(data), error: None }
    }

    pub fn err(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self { token: token.into(), ok: false, data: None, error: Some(message.into()) }
    }
}

/// Unsolicited push from the host: either a raw live-channel frame or
/// an already-parsed step event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum HostPush {
    #[serde(rename = "runs:event")]
    RunsEvent(Value),

    #[serde(rename = "runs:step")]
    RunsStep(Box<StepEvent>),
}

/// Serialize a message to its JSON wire bytes.
pub fn encode<T: Serialize>(msg: &T) -> Result<Vec<u8>, ProtocolError> {
    Ok(serde_json::to_vec(msg)?)
}

/// Parse a message from its JSON wire bytes.
pub fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
