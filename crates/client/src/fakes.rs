// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fakes for the client traits.
//!
//! Deterministic stand-ins for the real services: scripted state,
//! recorded calls, and injectable failures.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rv_core::{
    PackId, ResolvedPack, Run, RunId, RunStatus, StartRunRequest, WorkspaceDoc, WorkspaceId,
};

use crate::error::ClientError;
use crate::traits::{Page, PackResolver, RunDirectory, WorkspaceDirectory};

fn not_found(what: &str) -> ClientError {
    ClientError::Upstream { status: 404, body: format!("{what} not found") }
}

#[derive(Default)]
struct DirectoryState {
    runs: Vec<Run>,
    started: Vec<StartRunRequest>,
    deleted: Vec<RunId>,
    fail_next: Option<ClientError>,
    next_id: u32,
}

/// Fake learning service.
#[derive(Default)]
pub struct FakeRunDirectory {
    state: Mutex<DirectoryState>,
}

impl FakeRunDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the run list the directory will serve.
    pub fn set_runs(&self, runs: Vec<Run>) {
        self.state.lock().runs = runs;
    }

    pub fn push_run(&self, run: Run) {
        self.state.lock().runs.push(run);
    }

    /// Replace the stored snapshot for one run id, if present.
    pub fn update_run(&self, run: Run) {
        let mut state = self.state.lock();
        if let Some(slot) = state.runs.iter_mut().find(|r| r.run_id == run.run_id) {
            *slot = run;
        }
    }

    /// Fail the next directory call with `err`.
    pub fn fail_next(&self, err: ClientError) {
        self.state.lock().fail_next = Some(err);
    }

    pub fn started(&self) -> Vec<StartRunRequest> {
        self.state.lock().started.clone()
    }

    pub fn deleted(&self) -> Vec<RunId> {
        self.state.lock().deleted.clone()
    }

    fn take_failure(&self) -> Option<ClientError> {
        self.state.lock().fail_next.take()
    }
}

#[async_trait]
impl RunDirectory for FakeRunDirectory {
    async fn start(&self, body: &StartRunRequest) -> Result<Run, ClientError> {
        if body.workspace_id.is_empty() {
            return Err(ClientError::Validation("workspace_id is required".to_string()));
        }
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut state = self.state.lock();
        state.next_id += 1;
        state.started.push(body.clone());
        let run = Run {
            run_id: format!("run-{}", state.next_id).into(),
            workspace_id: body.workspace_id.clone(),
            playbook_id: body.playbook_id.clone(),
            status: RunStatus::Pending,
            title: body.title.clone(),
            options: body.options.clone(),
            ..Default::default()
        };
        state.runs.push(run.clone());
        Ok(run)
    }

    async fn list(&self, workspace_id: &WorkspaceId, _page: Page) -> Result<Vec<Run>, ClientError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let state = self.state.lock();
        Ok(state.runs.iter().filter(|r| &r.workspace_id == workspace_id).cloned().collect())
    }

    async fn get(&self, run_id: &RunId) -> Result<Run, ClientError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let state = self.state.lock();
        state.runs.iter().find(|r| &r.run_id == run_id).cloned().ok_or_else(|| not_found("run"))
    }

    async fn delete(&self, run_id: &RunId) -> Result<(), ClientError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut state = self.state.lock();
        let before = state.runs.len();
        state.runs.retain(|r| &r.run_id != run_id);
        if state.runs.len() == before {
            return Err(not_found("run"));
        }
        state.deleted.push(run_id.clone());
        Ok(())
    }
}

/// Fake capability service keyed by `key@version` (and any explicit
/// pack id).
#[derive(Default)]
pub struct FakePackResolver {
    packs: Mutex<Vec<ResolvedPack>>,
    fail_all: AtomicBool,
    resolve_calls: Mutex<Vec<String>>,
}

impl FakePackResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, pack: ResolvedPack) {
        self.packs.lock().push(pack);
    }

    /// Make every lookup fail as exhausted.
    pub fn fail_all(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    pub fn resolve_calls(&self) -> Vec<String> {
        self.resolve_calls.lock().clone()
    }
}

#[async_trait]
impl PackResolver for FakePackResolver {
    async fn resolve_by_key_version(
        &self,
        key: &str,
        version: &str,
    ) -> Result<ResolvedPack, ClientError> {
        self.resolve_calls.lock().push(format!("{key}@{version}"));
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(ClientError::Resolution {
                key: key.to_string(),
                version: version.to_string(),
            });
        }
        let packs = self.packs.lock();
        packs
            .iter()
            .find(|p| p.key.as_deref() == Some(key) && p.version.as_deref() == Some(version))
            .cloned()
            .ok_or_else(|| ClientError::Resolution {
                key: key.to_string(),
                version: version.to_string(),
            })
    }

    async fn get_pack(
        &self,
        pack_id: &PackId,
        _resolved: bool,
    ) -> Result<ResolvedPack, ClientError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(not_found("pack"));
        }
        let packs = self.packs.lock();
        packs
            .iter()
            .find(|p| p.any_id() == Some(pack_id))
            .cloned()
            .ok_or_else(|| not_found("pack"))
    }
}

/// Fake workspace + artifact services.
#[derive(Default)]
pub struct FakeWorkspaceDirectory {
    docs: Mutex<Vec<(WorkspaceId, WorkspaceDoc)>>,
    fail_next: Mutex<Option<ClientError>>,
}

impl FakeWorkspaceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_doc(&self, id: WorkspaceId, doc: WorkspaceDoc) {
        self.docs.lock().push((id, doc));
    }

    pub fn fail_next(&self, err: ClientError) {
        *self.fail_next.lock() = Some(err);
    }
}

#[async_trait]
impl WorkspaceDirectory for FakeWorkspaceDirectory {
    async fn get_doc(&self, id: &WorkspaceId) -> Result<WorkspaceDoc, ClientError> {
        if let Some(err) = self.fail_next.lock().take() {
            return Err(err);
        }
        let docs = self.docs.lock();
        docs.iter()
            .find(|(ws, _)| ws == id)
            .map(|(_, doc)| doc.clone())
            .ok_or_else(|| not_found("workspace"))
    }
}
