// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque identifiers assigned by the remote services.

crate::define_id! {
    /// Identifier of one learning run, unique across the learning service.
    pub struct RunId;
}

crate::define_id! {
    /// Identifier of a workspace in the workspace service.
    pub struct WorkspaceId;
}

crate::define_id! {
    /// Identifier of a playbook step, unique within one run.
    pub struct StepId;
}

crate::define_id! {
    /// Registry artifact-kind identifier (e.g. `cam.cobol.program`).
    pub struct KindId;
}

crate::define_id! {
    /// Capability pack identifier in canonical `key@version` form.
    pub struct PackId;
}

crate::define_id! {
    /// Identifier of a stored artifact in the artifact service.
    pub struct ArtifactId;
}

impl PackId {
    /// Canonical pack id for a key + version pair.
    pub fn from_key_version(key: &str, version: &str) -> Self {
        Self::from_string(format!("{}@{}", key, version))
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
