// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn run_with(extra: &str) -> Run {
    serde_json::from_str(&format!(r#"{{"run_id": "r1", {}}}"#, extra)).unwrap()
}

#[test]
fn prefers_diffs_by_kind() {
    let run = run_with(
        r#""diffs_by_kind": {
            "k.a": {"added": [{"kind_id": "k.a"}], "changed": [], "removed": [], "unchanged": []},
            "k.b": {"added": [], "changed": [{"before": null, "after": null}],
                     "removed": [{"kind_id": "k.b"}], "unchanged": [{"kind_id": "k.b"}]}
        },
        "deltas": {"counts": {"new": 99}}"#,
    );
    let c = counts_of(&run);
    assert_eq!(
        c,
        DeltaCounts { new: 1, updated: 1, unchanged: 1, retired: 1, deleted: 0 }
    );
}

#[test]
fn single_kind_scenario() {
    let run = run_with(
        r#""diffs_by_kind": {"k.a": {"added": [{"kind_id": "k.a"}], "changed": [], "removed": [], "unchanged": []}}"#,
    );
    let c = counts_of(&run);
    assert_eq!(c.new, 1);
    assert_eq!(c.updated, 0);
    assert_eq!(c.unchanged, 0);
    assert_eq!(c.retired, 0);
}

#[test]
fn malformed_diffs_by_kind_counts_zero_without_falling_back() {
    // diffs_by_kind is present but unparseable; the populated
    // deltas.counts underneath must not leak through.
    let run = run_with(
        r#""diffs_by_kind": {"k.a": "not a group"},
        "deltas": {"counts": {"new": 4, "updated": 2}}"#,
    );
    assert_eq!(counts_of(&run), DeltaCounts::default());
}

#[test]
fn falls_back_to_delta_counts() {
    let run = run_with(r#""deltas": {"counts": {"new": 2, "updated": 3, "deleted": 1}}"#);
    let c = counts_of(&run);
    assert_eq!(
        c,
        DeltaCounts { new: 2, updated: 3, unchanged: 0, retired: 0, deleted: 1 }
    );
}

#[test]
fn falls_back_to_artifacts_diff_arrays() {
    let run = run_with(
        r#""artifacts_diff": {"new": ["a", "b"], "updated": ["c"], "unchanged": [], "retired": ["d"]}"#,
    );
    let c = counts_of(&run);
    assert_eq!(
        c,
        DeltaCounts { new: 2, updated: 1, unchanged: 0, retired: 1, deleted: 0 }
    );
}

#[test]
fn bare_run_counts_zero() {
    let run = run_with(r#""status": "running""#);
    assert_eq!(counts_of(&run), DeltaCounts::default());
}
