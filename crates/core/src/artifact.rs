// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact records as stored by the artifact service.

use crate::id::{ArtifactId, KindId, WorkspaceId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored artifact. `natural_key` and `fingerprint` are optional on
/// the wire; the diff engine derives fallbacks when they are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    #[serde(default)]
    pub artifact_id: ArtifactId,
    #[serde(default)]
    pub workspace_id: WorkspaceId,
    #[serde(default)]
    pub kind: KindId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
