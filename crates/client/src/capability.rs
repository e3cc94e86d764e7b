// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability-service client: pack lookup with an ordered fallback
//! chain.
//!
//! Resolution by key+version walks three strategies, stopping at the
//! first usable pack: the resolved view of `key@version`, the basic
//! view of `key@version`, then a filtered list to discover an alternate
//! id and fetch that (resolved first, basic second). Intermediate
//! failures are logged and swallowed; only full exhaustion surfaces as
//! [`ClientError::Resolution`].

use async_trait::async_trait;
use rv_core::{PackId, ResolvedPack};

use crate::config::ServiceConfig;
use crate::error::ClientError;
use crate::http::{query, urlencode, Http};
use crate::traits::PackResolver;

#[derive(Debug, Clone)]
pub struct CapabilityClient {
    http: Http,
    base: String,
}

impl CapabilityClient {
    pub fn new(http: Http, config: &ServiceConfig) -> Self {
        Self { http, base: config.capability_base.clone() }
    }

    fn parse_pack(value: serde_json::Value) -> Result<ResolvedPack, ClientError> {
        serde_json::from_value(value.clone()).map_err(|_| ClientError::Upstream {
            status: 200,
            body: value.to_string(),
        })
    }
}

/// The raw pack endpoints the fallback chain is built from. Split out
/// so the chain itself can be exercised against scripted endpoints.
#[async_trait]
pub(crate) trait PackEndpoints: Send + Sync {
    async fn resolved(&self, pack_id: &PackId) -> Result<ResolvedPack, ClientError>;
    async fn basic(&self, pack_id: &PackId) -> Result<ResolvedPack, ClientError>;
    /// First pack matching the key+version filter, if any.
    async fn find_first(
        &self,
        key: &str,
        version: &str,
    ) -> Result<Option<ResolvedPack>, ClientError>;
}

#[async_trait]
impl PackEndpoints for CapabilityClient {
    async fn resolved(&self, pack_id: &PackId) -> Result<ResolvedPack, ClientError> {
        let url =
            format!("{}/capability/packs/{}/resolved", self.base, urlencode(pack_id.as_str()));
        Self::parse_pack(self.http.get(&url).await?)
    }

    async fn basic(&self, pack_id: &PackId) -> Result<ResolvedPack, ClientError> {
        let url = format!("{}/capability/packs/{}", self.base, urlencode(pack_id.as_str()));
        Self::parse_pack(self.http.get(&url).await?)
    }

    async fn find_first(
        &self,
        key: &str,
        version: &str,
    ) -> Result<Option<ResolvedPack>, ClientError> {
        let q = query(&[
            ("key", Some(key.to_string())),
            ("version", Some(version.to_string())),
            ("limit", Some("1".to_string())),
            ("offset", Some("0".to_string())),
        ]);
        let url = format!("{}/capability/packs{}", self.base, q);
        let value = self.http.get(&url).await?;
        let packs: Vec<ResolvedPack> = match serde_json::from_value(value) {
            Ok(list) => list,
            Err(_) => return Ok(None),
        };
        Ok(packs.into_iter().next())
    }
}

/// Walk the fallback chain over `ep`.
pub(crate) async fn resolve_with<E: PackEndpoints + ?Sized>(
    ep: &E,
    key: &str,
    version: &str,
) -> Result<ResolvedPack, ClientError> {
    if key.is_empty() || version.is_empty() {
        return Err(ClientError::Validation("key and version are required".to_string()));
    }
    let pack_id = PackId::from_key_version(key, version);

    match ep.resolved(&pack_id).await {
        Ok(pack) if pack.has_content() => return Ok(pack),
        Ok(_) => tracing::debug!(%pack_id, "resolved view empty, trying basic"),
        Err(e) => tracing::debug!(%pack_id, error = %e, "resolved view failed, trying basic"),
    }

    match ep.basic(&pack_id).await {
        Ok(pack) if pack.has_content() => return Ok(pack),
        Ok(_) => tracing::debug!(%pack_id, "basic view empty, trying list"),
        Err(e) => tracing::debug!(%pack_id, error = %e, "basic view failed, trying list"),
    }

    if let Ok(Some(first)) = ep.find_first(key, version).await {
        if let Some(alt) = first.any_id().cloned() {
            match ep.resolved(&alt).await {
                Ok(pack) => return Ok(pack),
                Err(e) => tracing::debug!(pack_id = %alt, error = %e, "alt resolved view failed"),
            }
            if let Ok(pack) = ep.basic(&alt).await {
                return Ok(pack);
            }
        }
    }

    tracing::warn!(key, version, "capability pack resolution exhausted");
    Err(ClientError::Resolution { key: key.to_string(), version: version.to_string() })
}

#[async_trait]
impl PackResolver for CapabilityClient {
    async fn resolve_by_key_version(
        &self,
        key: &str,
        version: &str,
    ) -> Result<ResolvedPack, ClientError> {
        resolve_with(self, key, version).await
    }

    async fn get_pack(
        &self,
        pack_id: &PackId,
        resolved: bool,
    ) -> Result<ResolvedPack, ClientError> {
        if pack_id.is_empty() {
            return Err(ClientError::Validation("pack_id is required".to_string()));
        }
        if resolved {
            match PackEndpoints::resolved(self, pack_id).await {
                Ok(pack) => return Ok(pack),
                Err(e) => tracing::debug!(%pack_id, error = %e, "resolved view failed, trying basic"),
            }
        }
        PackEndpoints::basic(self, pack_id).await
    }
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
