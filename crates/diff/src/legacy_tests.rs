// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::json;

fn art(kind: &str, name: &str, id: &str, fp: Option<&str>) -> ArtifactRecord {
    ArtifactRecord {
        artifact_id: id.into(),
        kind: kind.into(),
        name: name.to_string(),
        fingerprint: fp.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn natural_key_lowercases_kind_and_name() {
    let a = art("cam.cobol.Program", "PayRoll", "a1", None);
    assert_eq!(natural_key_of(&a), "cam.cobol.program:payroll");
}

#[test]
fn natural_key_prefers_server_supplied() {
    let mut a = art("cam.cobol.program", "payroll", "a1", None);
    a.natural_key = Some("custom-key".to_string());
    assert_eq!(natural_key_of(&a), "custom-key");
}

#[test]
fn fingerprint_depends_on_data() {
    let mut a = art("k", "n", "a1", None);
    let base = fingerprint_of(&a);
    a.data = Some(json!({"x": 1}));
    assert_ne!(fingerprint_of(&a), base);
    assert!(base.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
}

#[test]
fn index_side_skips_unnamed_and_fills_fingerprints() {
    let arts = vec![
        art("k", "", "a1", None),
        art("", "n", "a2", None),
        art("k", "n", "a3", None),
    ];
    let idx = index_side(&arts);
    assert_eq!(idx.len(), 1);
    let kept = &idx["k:n"];
    assert_eq!(kept.artifact_id, "a3");
    assert!(kept.fingerprint.as_deref().is_some_and(|f| !f.is_empty()));
}

#[test]
fn matching_id_is_unchanged_even_with_different_fingerprints() {
    let left = index_side(&[art("k", "n", "a1", Some("f1"))]);
    let right = index_side(&[art("k", "n", "a1", Some("f2"))]);
    let d = compute_diff(&left, &right);
    assert_eq!(d.groups.unchanged, vec!["k:n"]);
    assert_eq!(d.counts.unchanged, 1);
}

#[test]
fn matching_fingerprint_is_unchanged_across_ids() {
    let left = index_side(&[art("k", "n", "a1", Some("f1"))]);
    let right = index_side(&[art("k", "n", "a2", Some("f1"))]);
    let d = compute_diff(&left, &right);
    assert_eq!(d.groups.unchanged, vec!["k:n"]);
}

#[test]
fn neither_matching_is_updated() {
    let left = index_side(&[art("k", "n", "a1", Some("f1"))]);
    let right = index_side(&[art("k", "n", "a2", Some("f2"))]);
    let d = compute_diff(&left, &right);
    assert_eq!(d.groups.updated, vec!["k:n"]);
    assert!(d.groups.unchanged.is_empty());
}

#[test]
fn one_sided_keys_split_into_new_and_retired() {
    let left = index_side(&[art("k", "old", "a1", None)]);
    let right = index_side(&[art("k", "fresh", "a2", None)]);
    let d = compute_diff(&left, &right);
    assert_eq!(d.groups.new, vec!["k:fresh"]);
    assert_eq!(d.groups.retired, vec!["k:old"]);
    assert_eq!(d.counts.new, 1);
    assert_eq!(d.counts.retired, 1);
    assert_eq!(d.counts.deleted, 0);
}

#[test]
fn kind_and_name_splits_on_first_colon() {
    assert_eq!(kind_and_name("cam.cobol.program:pay:roll"), ("cam.cobol.program", "pay:roll"));
    assert_eq!(kind_and_name("bare"), ("bare", ""));
}

proptest! {
    // Every key on either side lands in exactly one group, and the
    // groups never overlap.
    #[test]
    fn partition_is_complete_and_disjoint(
        lefts in proptest::collection::vec(("k[a-c]", "n[0-9]{1,2}", "[a-z]{4}"), 0..8),
        rights in proptest::collection::vec(("k[a-c]", "n[0-9]{1,2}", "[a-z]{4}"), 0..8),
    ) {
        let lefts: Vec<_> = lefts.iter()
            .map(|(k, n, id)| art(k, n, id, None)).collect();
        let rights: Vec<_> = rights.iter()
            .map(|(k, n, id)| art(k, n, id, None)).collect();
        let left = index_side(&lefts);
        let right = index_side(&rights);
        let d = compute_diff(&left, &right);

        let mut seen = std::collections::BTreeSet::new();
        for g in [&d.groups.new, &d.groups.updated, &d.groups.unchanged, &d.groups.retired] {
            for nk in g {
                prop_assert!(seen.insert(nk.clone()), "key {nk} in two groups");
            }
        }
        let mut all: std::collections::BTreeSet<_> = left.keys().cloned().collect();
        all.extend(right.keys().cloned());
        prop_assert_eq!(seen, all);
    }
}
