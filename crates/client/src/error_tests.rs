// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    not_found = { 404, true },
    server_error = { 500, false },
    gone = { 410, false },
)]
fn is_not_found_matches_404_only(status: u16, expected: bool) {
    let err = ClientError::Upstream { status, body: String::new() };
    assert_eq!(err.is_not_found(), expected);
}

#[test]
fn non_upstream_variants_are_never_not_found() {
    assert!(!ClientError::Validation("x".into()).is_not_found());
    assert!(!ClientError::Transport("x".into()).is_not_found());
    let res = ClientError::Resolution { key: "k".into(), version: "v".into() };
    assert!(!res.is_not_found());
}

#[test]
fn display_includes_status_and_body() {
    let err = ClientError::Upstream { status: 502, body: "bad gateway".into() };
    assert_eq!(err.to_string(), "upstream responded 502: bad gateway");
}

#[test]
fn resolution_names_the_pack() {
    let err = ClientError::Resolution { key: "cobol-mainframe".into(), version: "v1.0.2".into() };
    assert_eq!(err.to_string(), "no capability pack found for cobol-mainframe@v1.0.2");
}
