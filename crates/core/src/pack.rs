// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability packs: versioned bundles of capability and playbook
//! definitions served by the capability service.

use crate::id::{KindId, PackId, StepId};
use crate::step::StepMeta;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A unit-of-work definition and the artifact kinds it can produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces_kinds: Vec<KindId>,
}

/// One step of a playbook definition, bound to a capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybookStep {
    pub id: StepId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability_id: Option<String>,
}

/// A named, ordered sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playbook {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<PlaybookStep>,
}

/// A capability pack, resolved or basic. Both views share this shape;
/// a view with neither capabilities nor playbooks is treated as empty
/// and the resolution chain moves on to its next strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PackId>,
    /// Legacy id field some service versions still emit.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<PackId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<Capability>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub playbooks: Vec<Playbook>,
}

impl ResolvedPack {
    /// A view is usable when it carries at least one of
    /// capabilities/playbooks.
    pub fn has_content(&self) -> bool {
        !self.capabilities.is_empty() || !self.playbooks.is_empty()
    }

    /// Whichever identifier field this record exposes.
    pub fn any_id(&self) -> Option<&PackId> {
        self.id.as_ref().or(self.legacy_id.as_ref())
    }

    /// Step metas for one playbook, joining each step against its
    /// capability for name and produced kinds. Unknown playbook ids
    /// yield an empty list.
    pub fn step_metas(&self, playbook_id: &str) -> Vec<StepMeta> {
        let caps: HashMap<&str, &Capability> =
            self.capabilities.iter().map(|c| (c.id.as_str(), c)).collect();
        let Some(pb) = self.playbooks.iter().find(|p| p.id == playbook_id) else {
            return Vec::new();
        };
        pb.steps
            .iter()
            .map(|s| {
                let cap = s.capability_id.as_deref().and_then(|id| caps.get(id).copied());
                StepMeta {
                    id: s.id.clone(),
                    capability_id: s.capability_id.clone(),
                    name: cap
                        .and_then(|c| c.name.clone())
                        .or_else(|| Some(s.id.to_string())),
                    produces_kinds: cap.map(|c| c.produces_kinds.clone()).unwrap_or_default(),
                }
            })
            .collect()
    }
}

/// Pack identity as hinted by a run: a direct `pack_id`, a `key` +
/// `version` pair, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackHint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PackHint {
    /// True when the hint is resolvable at all.
    pub fn is_usable(&self) -> bool {
        self.pack_id.is_some() || (self.key.is_some() && self.version.is_some())
    }

    /// The effective pack id: explicit, or synthesized as `key@version`.
    pub fn effective_id(&self) -> Option<PackId> {
        if let Some(id) = &self.pack_id {
            return Some(PackId::from_string(id.clone()));
        }
        match (&self.key, &self.version) {
            (Some(k), Some(v)) => Some(PackId::from_key_version(k, v)),
            _ => None,
        }
    }

    /// Fill missing fields from a fallback hint (run provenance over
    /// session defaults, for example).
    pub fn or_else_from(mut self, fallback: &PackHint) -> PackHint {
        if self.pack_id.is_none() {
            self.pack_id = fallback.pack_id.clone();
        }
        if self.key.is_none() {
            self.key = fallback.key.clone();
        }
        if self.version.is_none() {
            self.version = fallback.version.clone();
        }
        self
    }
}

#[cfg(test)]
#[path = "pack_tests.rs"]
mod tests;
