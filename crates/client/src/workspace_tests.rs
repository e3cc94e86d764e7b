// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn normalize_prefers_id_over_legacy_id() {
    let ws = WorkspaceClient::normalize(json!({
        "id": "ws-new",
        "_id": "ws-old",
        "name": "payroll",
    }))
    .unwrap();
    assert_eq!(ws.id, "ws-new");
    assert_eq!(ws.name, "payroll");
}

#[test]
fn normalize_accepts_legacy_id_alone() {
    let ws = WorkspaceClient::normalize(json!({ "_id": "ws-old", "name": "n" })).unwrap();
    assert_eq!(ws.id, "ws-old");
}

#[test]
fn normalize_rejects_record_without_any_id() {
    let err = WorkspaceClient::normalize(json!({ "name": "n" })).unwrap_err();
    match err {
        ClientError::Upstream { status: 200, body } => {
            assert!(body.contains("missing id"), "body: {body}");
        }
        other => panic!("wrong error: {other:?}"),
    }
}
