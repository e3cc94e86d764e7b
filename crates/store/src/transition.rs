// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-run status state machine, in one place.
//!
//! `created → pending → running → {completed | failed | canceled}`.
//! Snapshots are server-authoritative but may arrive stale; a snapshot
//! that would move status backward is ignored and logged. The only
//! locally initiated transition is the optimistic `pending → running`
//! promotion on the first `started` step event; step events never
//! terminate a run.

use rv_core::{RunId, RunStatus};

/// What is asking for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A directory snapshot (`get`/`list` result) carrying this status.
    Snapshot(RunStatus),
    /// A `started` step event was observed for the run.
    StepStarted,
}

/// Next status for a run given its current status and a trigger.
pub fn next_status(run_id: &RunId, current: RunStatus, trigger: Trigger) -> RunStatus {
    match trigger {
        Trigger::Snapshot(next) => {
            if next.rank() < current.rank() {
                tracing::warn!(
                    %run_id,
                    current = %current,
                    snapshot = %next,
                    "ignoring status regression from stale snapshot",
                );
                return current;
            }
            next
        }
        Trigger::StepStarted => {
            if current == RunStatus::Pending {
                tracing::debug!(%run_id, "optimistic promotion to running");
                RunStatus::Running
            } else {
                current
            }
        }
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
