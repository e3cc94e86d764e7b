// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rv-store: the authoritative in-memory projection of all runs for the
//! active workspace.
//!
//! Three independent input channels feed it: directory snapshots, live
//! step events, and user actions. The store reconciles them into one
//! consistent view per run, with a single centralized status-transition
//! function enforcing monotonicity.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod store;
pub mod transition;

pub use store::{CapabilityDefaults, RunStore, SeedOptions, StepProgress};
pub use transition::{next_status, Trigger};
