// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display identity for diff artifacts.

use crate::kinds::DiffArtifact;
use serde_json::{json, Value};

const KIND_COBOL_PROGRAM: &str = "cam.cobol.program";
const KIND_REPO_SNAPSHOT: &str = "cam.asset.repo_snapshot";

fn str_field<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Stable display name for one artifact row, kind-specific with a
/// generic fallback (identity hash, else truncated JSON of the data).
pub fn display_name_for(kind_id: &str, art: Option<&DiffArtifact>) -> String {
    let Some(art) = art else {
        return "(unknown)".to_string();
    };
    let data = art.data.as_ref().unwrap_or(&Value::Null);
    match kind_id {
        KIND_COBOL_PROGRAM => str_field(data, "program_id")
            .or_else(|| str_field(data, "id"))
            .map(str::to_string)
            .unwrap_or_else(|| "(program)".to_string()),
        KIND_REPO_SNAPSHOT => {
            let repo = str_field(data, "repo")
                .or_else(|| str_field(data, "url"))
                .unwrap_or("");
            match str_field(data, "commit") {
                Some(commit) => {
                    let short: String = commit.chars().take(7).collect();
                    format!("{repo}@{short}")
                }
                None => repo.to_string(),
            }
        }
        _ => {
            let identity = art.identity.as_ref().unwrap_or(&Value::Null);
            if let Some(hash) = str_field(identity, "hash").or_else(|| str_field(identity, "id")) {
                return hash.to_string();
            }
            let mut s = data.to_string();
            if s == "null" {
                return "(artifact)".to_string();
            }
            if s.len() > 80 {
                let mut end = 80;
                while !s.is_char_boundary(end) {
                    end -= 1;
                }
                s.truncate(end);
            }
            s
        }
    }
}

/// Strip an artifact down to the fields the diff view renders.
pub fn normalize_for_view(kind_id: &str, art: Option<&DiffArtifact>) -> Value {
    let Some(art) = art else {
        return json!({});
    };
    json!({
        "kind_id": kind_id,
        "schema_version": art.schema_version,
        "identity": art.identity,
        "data": art.data,
    })
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
