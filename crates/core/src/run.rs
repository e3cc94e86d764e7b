// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Learning run snapshots and the status ladder.

use crate::id::{RunId, StepId, WorkspaceId};
use crate::pack::PackHint;
use crate::step::StepEvent;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of a learning run.
///
/// Transitions are monotonic along
/// `created → pending → running → {completed | failed | canceled}`;
/// the store enforces this via [`rank`](RunStatus::rank).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Created,
    Pending,
    Running,
    Completed,
    Failed,
    Canceled,
}

crate::simple_display! {
    RunStatus {
        Created => "created",
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Canceled => "canceled",
    }
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed | RunStatus::Canceled)
    }

    /// Position on the monotonic status ladder. Terminal statuses share a
    /// rank: the server may legitimately reclassify one terminal outcome
    /// as another, but never reopen a finished run.
    pub fn rank(&self) -> u8 {
        match self {
            RunStatus::Created => 0,
            RunStatus::Pending => 1,
            RunStatus::Running => 2,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Canceled => 3,
        }
    }
}

/// Options attached to a run. Known keys are typed; anything else the
/// caller passed through rides along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One learning run as reported by the learning service, plus the
/// client-owned live view merged in from the push channel.
///
/// Directory snapshots (`list`/`get` results) may be partial; none of the
/// optional fields can be assumed populated. `live_steps` and
/// `step_events` never come from the wire — they are `#[serde(skip)]`
/// and accumulate locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Run {
    pub run_id: RunId,
    #[serde(default)]
    pub workspace_id: WorkspaceId,
    #[serde(default)]
    pub playbook_id: String,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RunOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-kind diff payload computed by the learning service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diffs_by_kind: Option<Value>,
    /// Legacy flat diff (four arrays of natural keys).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts_diff: Option<Value>,
    /// Legacy precomputed delta counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deltas: Option<Value>,
    /// Artifact snapshots attached to the run (legacy diff input).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_artifacts: Option<Value>,
    /// Provenance block some service versions attach (pack hints live here).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Value>,

    /// Locally merged step view, keyed by step id.
    #[serde(skip)]
    pub live_steps: IndexMap<StepId, StepEvent>,
    /// Append-only audit log of every step event received, duplicates
    /// included. Not used for rendering.
    #[serde(skip)]
    pub step_events: Vec<StepEvent>,
}

impl Run {
    /// Overwrite this run with a fresh directory snapshot while keeping
    /// the client-owned live view. The caller is responsible for status
    /// monotonicity; this only moves data.
    pub fn merge_snapshot(&mut self, mut snapshot: Run) {
        snapshot.live_steps = std::mem::take(&mut self.live_steps);
        snapshot.step_events = std::mem::take(&mut self.step_events);
        *self = snapshot;
    }

    /// Best-effort pack identity for this run, checked in the order the
    /// service has historically exposed it: typed options, then the
    /// provenance block, then legacy top-level keys.
    pub fn pack_hint(&self) -> PackHint {
        let opts = self.options.as_ref();
        let prov = self.provenance.as_ref();
        let prov_str = |k: &str| {
            prov.and_then(|p| p.get(k)).and_then(Value::as_str).map(str::to_string)
        };
        PackHint {
            pack_id: opts
                .and_then(|o| o.pack_id.clone())
                .or_else(|| prov_str("pack_id")),
            key: opts
                .and_then(|o| o.pack_key.clone())
                .or_else(|| prov_str("pack_key")),
            version: opts
                .and_then(|o| o.pack_version.clone())
                .or_else(|| prov_str("pack_version")),
        }
    }

    /// True when every known live step is still pending (or no live data
    /// exists at all). Drives the completed-run step backfill.
    pub fn all_steps_pending(&self) -> bool {
        self.live_steps.values().all(|s| s.status == crate::step::StepStatus::Pending)
    }

    /// Case-insensitive substring match over title, description,
    /// playbook, and status — the UI search box filter.
    pub fn matches_filter(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let title = self.title.as_deref().unwrap_or(self.run_id.as_str());
        let hay = format!(
            "{} {} {} {}",
            title.to_lowercase(),
            self.description.as_deref().unwrap_or("").to_lowercase(),
            self.playbook_id,
            self.status
        );
        hay.contains(&needle)
    }
}

/// Body of a start-run request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartRunRequest {
    #[serde(default, skip_serializing_if = "WorkspaceId::is_empty")]
    pub workspace_id: WorkspaceId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub playbook_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RunOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
