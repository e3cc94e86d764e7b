// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sample_pack() -> ResolvedPack {
    serde_json::from_str(
        r#"{
            "id": "cobol-mainframe@v1.0.2",
            "key": "cobol-mainframe",
            "version": "v1.0.2",
            "capabilities": [
                {"id": "cap.parse", "name": "Parse sources", "produces_kinds": ["cam.cobol.program"]},
                {"id": "cap.snapshot", "name": "Snapshot repo", "produces_kinds": ["cam.asset.repo_snapshot"]}
            ],
            "playbooks": [
                {"id": "pb.core", "steps": [
                    {"id": "s1", "capability_id": "cap.parse"},
                    {"id": "s2", "capability_id": "cap.snapshot"},
                    {"id": "s3", "capability_id": "cap.unknown"}
                ]}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn step_metas_join_capabilities() {
    let pack = sample_pack();
    let metas = pack.step_metas("pb.core");
    assert_eq!(metas.len(), 3);

    assert_eq!(metas[0].id, "s1");
    assert_eq!(metas[0].name.as_deref(), Some("Parse sources"));
    assert_eq!(metas[0].produces_kinds, vec![KindId::from("cam.cobol.program")]);

    // step bound to an unknown capability falls back to its own id
    assert_eq!(metas[2].name.as_deref(), Some("s3"));
    assert!(metas[2].produces_kinds.is_empty());
}

#[test]
fn step_metas_unknown_playbook_is_empty() {
    assert!(sample_pack().step_metas("pb.other").is_empty());
}

#[test]
fn has_content_requires_caps_or_playbooks() {
    assert!(sample_pack().has_content());
    let empty: ResolvedPack = serde_json::from_str(r#"{"id": "x@v1"}"#).unwrap();
    assert!(!empty.has_content());
}

#[test]
fn any_id_falls_back_to_legacy() {
    let legacy: ResolvedPack =
        serde_json::from_str(r#"{"_id": "x@v1", "capabilities": [{"id": "c"}]}"#).unwrap();
    assert_eq!(legacy.any_id().map(PackId::as_str), Some("x@v1"));
}

#[yare::parameterized(
    direct_id    = { Some("p@v1"), None, None, true, Some("p@v1") },
    key_version  = { None, Some("p"), Some("v1"), true, Some("p@v1") },
    key_only     = { None, Some("p"), None, false, None },
    version_only = { None, None, Some("v1"), false, None },
    nothing      = { None, None, None, false, None },
)]
fn hint_usability(
    pack_id: Option<&str>,
    key: Option<&str>,
    version: Option<&str>,
    usable: bool,
    effective: Option<&str>,
) {
    let hint = PackHint {
        pack_id: pack_id.map(str::to_string),
        key: key.map(str::to_string),
        version: version.map(str::to_string),
    };
    assert_eq!(hint.is_usable(), usable);
    assert_eq!(hint.effective_id().as_ref().map(PackId::as_str), effective);
}

#[test]
fn hint_fallback_fills_gaps_only() {
    let primary = PackHint { key: Some("run-key".into()), ..Default::default() };
    let fallback = PackHint {
        pack_id: Some("fb@v9".into()),
        key: Some("fb-key".into()),
        version: Some("v9".into()),
    };
    let merged = primary.or_else_from(&fallback);
    assert_eq!(merged.key.as_deref(), Some("run-key"));
    assert_eq!(merged.version.as_deref(), Some("v9"));
    assert_eq!(merged.pack_id.as_deref(), Some("fb@v9"));
}
