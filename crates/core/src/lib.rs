// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rv-core: Domain model for the Renova client core.
//!
//! Types shared by the directory/capability clients, the live event
//! channel, the run state store, and the diff engine. Everything here is
//! wire-shaped: records deserialize straight from the remote services and
//! the push channel, with normalization (wrapped numerics, `id`/`_id`
//! aliases) done at that boundary and nowhere else.

pub mod macros;

pub mod artifact;
pub mod event;
pub mod id;
pub mod pack;
pub mod run;
pub mod step;
pub mod wire_num;
pub mod workspace;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use artifact::ArtifactRecord;
pub use event::{LiveEvent, RunLifecycle};
pub use id::{ArtifactId, KindId, PackId, RunId, StepId, WorkspaceId};
pub use pack::{Capability, PackHint, Playbook, PlaybookStep, ResolvedPack};
pub use run::{Run, RunOptions, RunStatus, StartRunRequest};
pub use step::{StepEvent, StepMeta, StepRef, StepStatus};
pub use wire_num::WireNumber;
pub use workspace::{Workspace, WorkspaceDoc};
