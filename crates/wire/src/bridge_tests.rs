// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[tokio::test]
async fn issue_then_resolve_delivers_reply() {
    let bridge = RequestBridge::new();
    let (req, rx) = bridge.issue(HostOp::WorkspaceList);
    assert_eq!(bridge.pending_count(), 1);

    assert!(bridge.resolve(HostReply::ok(req.token.clone(), json!([]))));
    let reply = rx.await.expect("waiter should get the reply");
    assert!(reply.ok);
    assert_eq!(reply.token, req.token);
    assert_eq!(bridge.pending_count(), 0);
}

#[test]
fn resolve_unknown_token_is_rejected() {
    let bridge = RequestBridge::new();
    assert!(!bridge.resolve(HostReply::err("no-such", "late")));
}

#[test]
fn resolve_is_one_shot_per_token() {
    let bridge = RequestBridge::new();
    let (req, _rx) = bridge.issue(HostOp::WorkspaceList);
    let first = HostReply::ok(req.token.clone(), json!(1));
    let second = HostReply::ok(req.token.clone(), json!(2));
    // _rx alive, so the first send succeeds
    assert!(bridge.resolve(first));
    assert!(!bridge.resolve(second));
}

#[test]
fn tokens_are_unique_per_request() {
    let bridge = RequestBridge::new();
    let (a, _ra) = bridge.issue(HostOp::WorkspaceList);
    let (b, _rb) = bridge.issue(HostOp::WorkspaceList);
    assert_ne!(a.token, b.token);
    assert_eq!(bridge.pending_count(), 2);
}

#[tokio::test]
async fn abort_all_fails_outstanding_waiters() {
    let bridge = RequestBridge::new();
    let (_req, rx) = bridge.issue(HostOp::RunsGet { run_id: "r1".to_string() });
    bridge.abort_all();
    assert!(rx.await.is_err());
    assert_eq!(bridge.pending_count(), 0);
}

#[tokio::test]
async fn dropped_receiver_entry_is_cleared_on_resolve() {
    let bridge = RequestBridge::new();
    let (req, rx) = bridge.issue(HostOp::WorkspaceList);
    drop(rx);
    // Send fails (no waiter) but the entry is removed either way.
    assert!(!bridge.resolve(HostReply::ok(req.token, json!(null))));
    assert_eq!(bridge.pending_count(), 0);
}
