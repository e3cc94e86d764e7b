// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delta counts for a run, with the historical payload precedence.

use crate::kinds::DiffsByKind;
use rv_core::Run;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregate artifact-delta counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaCounts {
    pub new: u64,
    pub updated: u64,
    pub unchanged: u64,
    pub retired: u64,
    pub deleted: u64,
}

/// Derive delta counts for a run.
///
/// Precedence follows what the service has shipped over time:
/// 1. `diffs_by_kind` — sum the four buckets across kinds; when present
///    it is authoritative even if malformed (zero counts);
/// 2. `deltas.counts` — precomputed counts object;
/// 3. `artifacts_diff` — four arrays of natural keys.
/// A run with none of them counts as all zeroes.
pub fn counts_of(run: &Run) -> DeltaCounts {
    if let Some(dbk) = &run.diffs_by_kind {
        // A present diffs_by_kind is authoritative: malformed buckets
        // count as zero, never as a fallthrough to the legacy payloads.
        let mut c = DeltaCounts::default();
        if let Ok(parsed) = serde_json::from_value::<DiffsByKind>(dbk.clone()) {
            for group in parsed.values() {
                c.new += group.added.len() as u64;
                c.updated += group.changed.len() as u64;
                c.unchanged += group.unchanged.len() as u64;
                c.retired += group.removed.len() as u64;
            }
        }
        return c;
    }

    if let Some(direct) = run.deltas.as_ref().and_then(|d| d.get("counts")) {
        if direct.is_object() {
            let n = |k: &str| direct.get(k).and_then(Value::as_u64).unwrap_or(0);
            return DeltaCounts {
                new: n("new"),
                updated: n("updated"),
                unchanged: n("unchanged"),
                retired: n("retired"),
                deleted: n("deleted"),
            };
        }
    }

    let ad = run.artifacts_diff.as_ref();
    let len = |k: &str| {
        ad.and_then(|d| d.get(k))
            .and_then(Value::as_array)
            .map(|a| a.len() as u64)
            .unwrap_or(0)
    };
    DeltaCounts {
        new: len("new"),
        updated: len("updated"),
        unchanged: len("unchanged"),
        retired: len("retired"),
        deleted: len("deleted"),
    }
}

#[cfg(test)]
#[path = "counts_tests.rs"]
mod tests;
