// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test builders and proptest strategies shared across crates.

use crate::run::{Run, RunOptions, RunStatus};
use crate::step::{StepEvent, StepMeta, StepRef, StepStatus};

crate::builder! {
    pub struct RunBuilder => Run {
        into {
            run_id: crate::RunId = "run-1",
            workspace_id: crate::WorkspaceId = "ws-1",
            playbook_id: String = "pb.core",
        }
        set {
            status: RunStatus = RunStatus::Pending,
        }
        option {
            title: String = None,
            options: RunOptions = None,
        }
    }
}

crate::builder! {
    pub struct StepEventBuilder => StepEvent {
        into {
            run_id: crate::RunId = "run-1",
        }
        set {
            step: StepRef = StepRef { id: "s1".into(), capability_id: None, name: None },
            status: StepStatus = StepStatus::Started,
        }
        option {
            started_at: String = None,
            error: String = None,
        }
    }
}

/// Shorthand for a step event with just an id and status.
pub fn step_event(run_id: &str, step_id: &str, status: StepStatus) -> StepEvent {
    StepEvent {
        run_id: run_id.into(),
        step: StepRef { id: step_id.into(), capability_id: None, name: None },
        status,
        ..Default::default()
    }
}

/// Shorthand for a seed meta.
pub fn step_meta(id: &str, capability_id: &str, name: &str) -> StepMeta {
    StepMeta {
        id: id.into(),
        capability_id: Some(capability_id.to_string()),
        name: Some(name.to_string()),
        produces_kinds: Vec::new(),
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod strategies {
    use super::*;
    use proptest::prelude::*;

    pub fn run_status() -> impl Strategy<Value = RunStatus> {
        prop_oneof![
            Just(RunStatus::Created),
            Just(RunStatus::Pending),
            Just(RunStatus::Running),
            Just(RunStatus::Completed),
            Just(RunStatus::Failed),
            Just(RunStatus::Canceled),
        ]
    }

    pub fn step_status() -> impl Strategy<Value = StepStatus> {
        prop_oneof![
            Just(StepStatus::Pending),
            Just(StepStatus::Started),
            Just(StepStatus::Completed),
            Just(StepStatus::Failed),
        ]
    }
}
