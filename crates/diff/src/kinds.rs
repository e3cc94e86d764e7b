// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-kind diff payload shipped inside a run snapshot.

use indexmap::IndexMap;
use rv_core::KindId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized snapshot of one artifact under one kind — the leaf unit
/// of comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffArtifact {
    #[serde(default)]
    pub kind_id: KindId,
    /// May arrive as a string or a number; kept opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Value>,
}

/// One artifact whose identity persisted across two snapshots but whose
/// data differs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<DiffArtifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<DiffArtifact>,
}

/// The four buckets for a single kind, verbatim from the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<DiffArtifact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<DiffArtifact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changed: Vec<ChangedEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unchanged: Vec<DiffArtifact>,
}

/// `diffs_by_kind`: kind id → classified buckets, in server order.
pub type DiffsByKind = IndexMap<KindId, KindDiff>;
