// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Legacy two-snapshot diff, kept for runs that predate `diffs_by_kind`.
//!
//! Each side is an artifact collection indexed by natural key
//! (`kind:name`, lowercase, unless the server supplied one). A key only
//! on the right is `new`, only on the left is `retired`; present on both
//! it is `unchanged` when the artifact id or fingerprint matches, else
//! `updated`. Groups come out sorted for deterministic display.

use rv_core::ArtifactRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::counts::DeltaCounts;

/// Output of [`compute_diff`]: counts plus the four sorted key groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyDiff {
    pub counts: DeltaCounts,
    pub groups: LegacyGroups,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyGroups {
    pub new: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub retired: Vec<String>,
}

/// Natural key for an artifact: the server-supplied one, else
/// `kind:name` lowercased.
pub fn natural_key_of(a: &ArtifactRecord) -> String {
    match &a.natural_key {
        Some(nk) if !nk.is_empty() => nk.clone(),
        _ => format!("{}:{}", a.kind, a.name).to_lowercase(),
    }
}

/// Local fingerprint fallback for artifacts the server sent without one:
/// djb2-xor over `{kind, name, data}`, base-36. Only equality matters.
pub fn fingerprint_of(a: &ArtifactRecord) -> String {
    let subject = serde_json::json!({
        "kind": a.kind,
        "name": a.name,
        "data": a.data.clone().unwrap_or(Value::Null),
    });
    let s = subject.to_string();
    let mut h: u32 = 5381;
    for b in s.bytes() {
        h = h.wrapping_mul(33) ^ u32::from(b);
    }
    to_base36(h)
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Index one diff side by natural key, filling in fingerprint fallbacks.
/// Last writer wins on key collisions, matching the service's own
/// de-duplication.
pub fn index_side(artifacts: &[ArtifactRecord]) -> BTreeMap<String, ArtifactRecord> {
    let mut map = BTreeMap::new();
    for a in artifacts {
        if a.kind.is_empty() || a.name.is_empty() {
            continue;
        }
        let mut a = a.clone();
        let nk = natural_key_of(&a);
        if a.fingerprint.as_deref().unwrap_or("").is_empty() {
            a.fingerprint = Some(fingerprint_of(&a));
        }
        a.natural_key = Some(nk.clone());
        map.insert(nk, a);
    }
    map
}

/// Partition two indexed snapshots into the four legacy groups.
pub fn compute_diff(
    left: &BTreeMap<String, ArtifactRecord>,
    right: &BTreeMap<String, ArtifactRecord>,
) -> LegacyDiff {
    let mut new = Vec::new();
    let mut updated = Vec::new();
    let mut unchanged = Vec::new();
    let mut retired = Vec::new();

    for (nk, r) in right {
        match left.get(nk) {
            None => new.push(nk.clone()),
            Some(l) => {
                let same_id = !l.artifact_id.is_empty()
                    && !r.artifact_id.is_empty()
                    && l.artifact_id == r.artifact_id;
                let same_fp = matches!(
                    (&l.fingerprint, &r.fingerprint),
                    (Some(lf), Some(rf)) if !lf.is_empty() && lf == rf
                );
                if same_id || same_fp {
                    unchanged.push(nk.clone());
                } else {
                    updated.push(nk.clone());
                }
            }
        }
    }
    for nk in left.keys() {
        if !right.contains_key(nk) {
            retired.push(nk.clone());
        }
    }

    new.sort();
    updated.sort();
    unchanged.sort();
    retired.sort();

    LegacyDiff {
        counts: DeltaCounts {
            new: new.len() as u64,
            updated: updated.len() as u64,
            unchanged: unchanged.len() as u64,
            retired: retired.len() as u64,
            deleted: 0,
        },
        groups: LegacyGroups { new, updated, unchanged, retired },
    }
}

/// Split a `kind:name` natural key back into its parts. Keys without a
/// separator come back as `(key, "")`.
pub fn kind_and_name(nk: &str) -> (&str, &str) {
    match nk.find(':') {
        Some(i) if i > 0 => (&nk[..i], &nk[i + 1..]),
        _ => (nk, ""),
    }
}

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;
