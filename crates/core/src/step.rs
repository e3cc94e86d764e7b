// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step events and the enrichment-preserving merge.
//!
//! A [`StepEvent`] is one observation about one playbook step within one
//! run, keyed by `(run_id, step.id)`. Events arrive at most once each
//! over the live channel, possibly out of order, and later events may
//! omit metadata earlier events carried. The merge rule is last-write-
//! wins per field with monotonic enrichment: a known `capability_id`,
//! `name`, or `produces_kinds` is never lost to an event that omits it.

use crate::id::{KindId, RunId, StepId};
use crate::wire_num::WireNumber;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Status of one playbook step as reported by the learning service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    Started,
    Completed,
    Failed,
}

crate::simple_display! {
    StepStatus {
        Pending => "pending",
        Started => "started",
        Completed => "completed",
        Failed => "failed",
    }
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Failed)
    }
}

/// The step identity block of a step event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepRef {
    pub id: StepId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One observation about one playbook step within one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    pub run_id: RunId,
    pub step: StepRef,
    #[serde(default)]
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    /// Seconds; may arrive wrapped (`{"$numberDouble": "..."}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_s: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces_kinds: Vec<KindId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepEvent {
    /// A `pending` placeholder for a step we know about from the playbook
    /// definition but have not yet observed.
    pub fn placeholder(run_id: RunId, meta: &StepMeta) -> Self {
        StepEvent {
            run_id,
            step: StepRef {
                id: meta.id.clone(),
                capability_id: meta.capability_id.clone(),
                name: meta.name.clone(),
            },
            status: StepStatus::Pending,
            produces_kinds: meta.produces_kinds.clone(),
            ..Default::default()
        }
    }

    /// Merge a later observation into this one.
    ///
    /// Fields present in `new` win; fields absent in `new` keep their
    /// previously observed value. `status` is always taken from `new`.
    pub fn merge_from(&mut self, new: &StepEvent) {
        self.status = new.status;
        if new.step.capability_id.is_some() {
            self.step.capability_id = new.step.capability_id.clone();
        }
        if new.step.name.is_some() {
            self.step.name = new.step.name.clone();
        }
        if !new.produces_kinds.is_empty() {
            self.produces_kinds = new.produces_kinds.clone();
        }
        if new.started_at.is_some() {
            self.started_at = new.started_at.clone();
        }
        if new.ended_at.is_some() {
            self.ended_at = new.ended_at.clone();
        }
        if new.duration_s.is_some() {
            self.duration_s = new.duration_s;
        }
        if new.error.is_some() {
            self.error = new.error.clone();
        }
    }

    /// Fill metadata gaps from a playbook step definition without touching
    /// anything observed (status, timestamps, duration, error).
    pub fn enrich_from_meta(&mut self, meta: &StepMeta) {
        if self.step.capability_id.is_none() {
            self.step.capability_id = meta.capability_id.clone();
        }
        if self.step.name.is_none() {
            self.step.name = meta.name.clone();
        }
        if self.produces_kinds.is_empty() {
            self.produces_kinds = meta.produces_kinds.clone();
        }
    }

    /// Display ordering: `started_at` ascending with missing timestamps
    /// first, ties broken by step id lexicographically.
    pub fn display_order(a: &StepEvent, b: &StepEvent) -> Ordering {
        let ta = parse_epoch_ms(a.started_at.as_deref());
        let tb = parse_epoch_ms(b.started_at.as_deref());
        ta.cmp(&tb).then_with(|| a.step.id.cmp(&b.step.id))
    }
}

/// Missing or unparseable timestamps sort as the epoch (earliest).
fn parse_epoch_ms(ts: Option<&str>) -> i64 {
    ts.and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Seed data for one playbook step, derived from a resolved capability
/// pack. Used only to pre-populate pending placeholders so the UI can
/// show a full step list before any real event arrives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepMeta {
    pub id: StepId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces_kinds: Vec<KindId>,
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
