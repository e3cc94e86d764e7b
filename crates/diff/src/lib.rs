// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rv-diff: partitioned, displayable diffs of run artifacts.
//!
//! Two paths produce a diff. The current one reads a run's
//! `diffs_by_kind` payload, where the learning service has already
//! classified every artifact per kind; the client only aggregates
//! counts. The legacy one compares two artifact snapshots by natural
//! key and classifies each key itself.

pub mod counts;
pub mod display;
pub mod kinds;
pub mod legacy;

pub use counts::{counts_of, DeltaCounts};
pub use display::{display_name_for, normalize_for_view};
pub use kinds::{ChangedEntry, DiffArtifact, DiffsByKind, KindDiff};
pub use legacy::{
    compute_diff, fingerprint_of, index_side, kind_and_name, natural_key_of, LegacyDiff,
    LegacyGroups,
};
