// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol shape tests: tag strings and payload casing are load-bearing,
//! the host shell matches on them verbatim.

use super::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    workspace_list = { HostOp::WorkspaceList, "workspace:list" },
    get_doc = { HostOp::WorkspaceGetDoc { id: "ws1".into() }, "workspace:getDoc" },
    runs_get = { HostOp::RunsGet { run_id: "r1".to_string() }, "runs:get" },
    runs_delete = { HostOp::RunsDelete { run_id: "r1".to_string() }, "runs:delete" },
    kind_get = { HostOp::RegistryKindGet { key: "cam.cobol.program".to_string() }, "registry:kind:get" },
)]
fn op_tag_strings(op: HostOp, tag: &str) {
    let v = serde_json::to_value(HostRequest { token: "t1".into(), op }).unwrap();
    assert_eq!(v["type"], tag);
    assert_eq!(v["token"], "t1");
}

#[test]
fn runs_list_payload_uses_camel_case_workspace_id() {
    let req = HostRequest {
        token: "t2".into(),
        op: HostOp::RunsList { workspace_id: "ws1".into(), limit: Some(50), offset: None },
    };
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v["type"], "runs:list");
    assert_eq!(v["payload"]["workspaceId"], "ws1");
    assert_eq!(v["payload"]["limit"], 50);
    assert!(v["payload"].get("offset").is_none());
}

#[test]
fn runs_start_wraps_body_under_request_body() {
    let body = rv_core::StartRunRequest {
        workspace_id: "ws1".into(),
        playbook_id: "pb.core".to_string(),
        ..Default::default()
    };
    let v = serde_json::to_value(HostRequest {
        token: "t3".into(),
        op: HostOp::RunsStart { request_body: body },
    })
    .unwrap();
    assert_eq!(v["payload"]["requestBody"]["workspace_id"], "ws1");
    assert_eq!(v["payload"]["requestBody"]["playbook_id"], "pb.core");
}

#[test]
fn pack_get_defaults_resolved_to_true() {
    let raw = json!({
        "token": "t4",
        "type": "capability:pack:get",
        "payload": { "pack_id": "cobol-mainframe@v1.0.2" },
    });
    let req: HostRequest = serde_json::from_value(raw).unwrap();
    match req.op {
        HostOp::CapabilityPackGet { pack_id, resolved, key, version } => {
            assert_eq!(pack_id.as_deref(), Some("cobol-mainframe@v1.0.2"));
            assert!(resolved);
            assert!(key.is_none() && version.is_none());
        }
        other => panic!("wrong op: {other:?}"),
    }
}

#[test]
fn unit_op_roundtrips_without_payload() {
    let req = HostRequest { token: "t5".into(), op: HostOp::WorkspaceList };
    let bytes = encode(&req).unwrap();
    let back: HostRequest = decode(&bytes).unwrap();
    assert_eq!(back, req);
}

#[test]
fn reply_helpers_set_exactly_one_side() {
    let ok = HostReply::ok("t6", json!([1, 2]));
    assert!(ok.ok && ok.error.is_none());
    let err = HostReply::err("t6", "boom");
    assert!(!err.ok && err.data.is_none());
    assert_eq!(err.error.as_deref(), Some("boom"));
}

#[test]
fn push_step_event_parses() {
    let raw = json!({
        "type": "runs:step",
        "payload": {
            "run_id": "r1",
            "step": { "id": "s1" },
            "status": "started",
        },
    });
    let push: HostPush = serde_json::from_value(raw).unwrap();
    match push {
        HostPush::RunsStep(ev) => {
            assert_eq!(ev.run_id, "r1");
            assert_eq!(ev.step.id, "s1");
        }
        other => panic!("wrong push: {other:?}"),
    }
}
