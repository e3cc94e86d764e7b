// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

fn art(data: serde_json::Value) -> DiffArtifact {
    DiffArtifact { data: Some(data), ..Default::default() }
}

#[parameterized(
    program_id = { json!({"program_id": "PAYROLL"}), "PAYROLL" },
    id_fallback = { json!({"id": "ACCTREC"}), "ACCTREC" },
    neither = { json!({}), "(program)" },
)]
fn cobol_program_names(data: serde_json::Value, expected: &str) {
    assert_eq!(display_name_for("cam.cobol.program", Some(&art(data))), expected);
}

#[test]
fn repo_snapshot_short_commit() {
    let a = art(json!({"repo": "acme/core", "commit": "0123456789abcdef"}));
    assert_eq!(display_name_for("cam.asset.repo_snapshot", Some(&a)), "acme/core@0123456");
}

#[test]
fn repo_snapshot_without_commit() {
    let a = art(json!({"url": "https://git/acme/core"}));
    assert_eq!(display_name_for("cam.asset.repo_snapshot", Some(&a)), "https://git/acme/core");
}

#[test]
fn fallback_prefers_identity_hash() {
    let a = DiffArtifact {
        identity: Some(json!({"hash": "abc123"})),
        data: Some(json!({"big": "payload"})),
        ..Default::default()
    };
    assert_eq!(display_name_for("cam.other.kind", Some(&a)), "abc123");
}

#[test]
fn fallback_truncates_json_at_80_bytes() {
    let a = art(json!({"text": "x".repeat(200)}));
    let name = display_name_for("cam.other.kind", Some(&a));
    assert_eq!(name.len(), 80);
}

#[test]
fn missing_artifact_is_unknown() {
    assert_eq!(display_name_for("cam.cobol.program", None), "(unknown)");
}

#[test]
fn dataless_unknown_kind_is_generic_label() {
    let a = DiffArtifact::default();
    assert_eq!(display_name_for("cam.other.kind", Some(&a)), "(artifact)");
}

#[test]
fn normalize_keeps_only_view_fields() {
    let a = DiffArtifact {
        kind_id: "cam.cobol.program".into(),
        schema_version: Some(json!(2)),
        identity: Some(json!({"hash": "h"})),
        data: Some(json!({"program_id": "P"})),
        provenance: Some(json!({"run_id": "r1"})),
    };
    let v = normalize_for_view("cam.cobol.program", Some(&a));
    assert_eq!(
        v,
        json!({
            "kind_id": "cam.cobol.program",
            "schema_version": 2,
            "identity": {"hash": "h"},
            "data": {"program_id": "P"},
        })
    );
    assert_eq!(normalize_for_view("any", None), json!({}));
}
