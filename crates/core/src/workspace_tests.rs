// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn normalizes_modern_id() {
    let raw: RawWorkspace =
        serde_json::from_str(r#"{"id": "ws1", "name": "Payments"}"#).unwrap();
    let ws = Workspace::try_from(raw).unwrap();
    assert_eq!(ws.id, "ws1");
    assert_eq!(ws.name, "Payments");
}

#[test]
fn normalizes_legacy_underscore_id() {
    let raw: RawWorkspace =
        serde_json::from_str(r#"{"_id": "ws2", "name": "Billing"}"#).unwrap();
    let ws = Workspace::try_from(raw).unwrap();
    assert_eq!(ws.id, "ws2");
}

#[test]
fn modern_id_wins_when_both_present() {
    let raw: RawWorkspace =
        serde_json::from_str(r#"{"id": "a", "_id": "b", "name": "n"}"#).unwrap();
    assert_eq!(Workspace::try_from(raw).unwrap().id, "a");
}

#[test]
fn missing_both_ids_is_an_error() {
    let raw: RawWorkspace = serde_json::from_str(r#"{"name": "orphan"}"#).unwrap();
    assert!(Workspace::try_from(raw).is_err());
}

#[test]
fn doc_defaults_to_empty_artifacts() {
    let doc: WorkspaceDoc = serde_json::from_str(r#"{}"#).unwrap();
    assert!(doc.workspace.is_none());
    assert!(doc.artifacts.is_empty());
}
