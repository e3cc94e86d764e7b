// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::step::{StepRef, StepStatus};

#[yare::parameterized(
    created   = { RunStatus::Created, false, 0 },
    pending   = { RunStatus::Pending, false, 1 },
    running   = { RunStatus::Running, false, 2 },
    completed = { RunStatus::Completed, true, 3 },
    failed    = { RunStatus::Failed, true, 3 },
    canceled  = { RunStatus::Canceled, true, 3 },
)]
fn status_ladder(status: RunStatus, terminal: bool, rank: u8) {
    assert_eq!(status.is_terminal(), terminal);
    assert_eq!(status.rank(), rank);
}

#[test]
fn status_serde_snake_case() {
    assert_eq!(serde_json::to_string(&RunStatus::Canceled).unwrap(), "\"canceled\"");
    let s: RunStatus = serde_json::from_str("\"running\"").unwrap();
    assert_eq!(s, RunStatus::Running);
}

#[test]
fn partial_snapshot_deserializes() {
    // The server may omit nearly everything on list responses.
    let run: Run = serde_json::from_str(r#"{"run_id": "r1", "status": "pending"}"#).unwrap();
    assert_eq!(run.run_id, "r1");
    assert_eq!(run.status, RunStatus::Pending);
    assert!(run.options.is_none());
    assert!(run.live_steps.is_empty());
}

#[test]
fn unknown_option_keys_ride_along() {
    let json = r#"{"pack_key": "k", "temperature": 0.2}"#;
    let opts: RunOptions = serde_json::from_str(json).unwrap();
    assert_eq!(opts.pack_key.as_deref(), Some("k"));
    assert_eq!(opts.extra.get("temperature").and_then(|v| v.as_f64()), Some(0.2));

    let back = serde_json::to_value(&opts).unwrap();
    assert_eq!(back.get("temperature").and_then(|v| v.as_f64()), Some(0.2));
}

#[test]
fn merge_snapshot_preserves_live_view() {
    let mut run: Run = serde_json::from_str(r#"{"run_id": "r1", "status": "running"}"#).unwrap();
    run.live_steps.insert(
        "s1".into(),
        StepEvent {
            run_id: "r1".into(),
            step: StepRef { id: "s1".into(), ..Default::default() },
            status: StepStatus::Started,
            ..Default::default()
        },
    );
    run.step_events.push(run.live_steps["s1"].clone());

    let snapshot: Run =
        serde_json::from_str(r#"{"run_id": "r1", "status": "completed", "title": "t"}"#).unwrap();
    run.merge_snapshot(snapshot);

    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.title.as_deref(), Some("t"));
    assert_eq!(run.live_steps.len(), 1);
    assert_eq!(run.step_events.len(), 1);
}

#[test]
fn pack_hint_prefers_options_over_provenance() {
    let run: Run = serde_json::from_str(
        r#"{
            "run_id": "r1",
            "options": {"pack_key": "opt-key"},
            "provenance": {"pack_key": "prov-key", "pack_version": "v2"}
        }"#,
    )
    .unwrap();
    let hint = run.pack_hint();
    assert_eq!(hint.key.as_deref(), Some("opt-key"));
    assert_eq!(hint.version.as_deref(), Some("v2"));
    assert!(hint.pack_id.is_none());
}

#[test]
fn all_steps_pending_vacuous_on_empty() {
    let run = Run { run_id: "r1".into(), ..Default::default() };
    assert!(run.all_steps_pending());
}

#[test]
fn filter_matches_title_and_status() {
    let run: Run = serde_json::from_str(
        r#"{"run_id": "r1", "title": "Nightly COBOL scan", "playbook_id": "pb.core", "status": "running"}"#,
    )
    .unwrap();
    assert!(run.matches_filter("cobol"));
    assert!(run.matches_filter("RUNNING"));
    assert!(run.matches_filter("pb.core"));
    assert!(run.matches_filter("  "));
    assert!(!run.matches_filter("retired"));
}

#[test]
fn start_request_skips_empty_fields() {
    let req = StartRunRequest { playbook_id: "pb.core".into(), ..Default::default() };
    let v = serde_json::to_value(&req).unwrap();
    assert!(v.get("workspace_id").is_none());
    assert_eq!(v.get("playbook_id").and_then(|p| p.as_str()), Some("pb.core"));
}
