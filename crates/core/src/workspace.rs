// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace records from the workspace service.
//!
//! Raw records may carry their identifier as `id` or as the legacy
//! `_id`; normalization picks whichever is present and rejects records
//! with neither.

use crate::artifact::ArtifactRecord;
use crate::id::WorkspaceId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A workspace record as the services emit it, before id normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWorkspace {
    #[serde(default)]
    pub id: Option<WorkspaceId>,
    #[serde(rename = "_id", default)]
    pub legacy_id: Option<WorkspaceId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Error)]
#[error("workspace record missing id/_id")]
pub struct MissingWorkspaceId;

/// A normalized workspace record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl TryFrom<RawWorkspace> for Workspace {
    type Error = MissingWorkspaceId;

    fn try_from(raw: RawWorkspace) -> Result<Self, Self::Error> {
        let id = raw.id.or(raw.legacy_id).ok_or(MissingWorkspaceId)?;
        Ok(Workspace {
            id,
            name: raw.name,
            description: raw.description,
            created_by: raw.created_by,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

/// Consolidated workspace document: the workspace header plus its
/// artifact listing, as served by the artifact service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Workspace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<ArtifactRecord>,
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
