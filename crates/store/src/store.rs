// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The run state store.
//!
//! Operations run to completion up to their awaited network calls; the
//! UI may interleave further operations at those suspension points, so
//! every response application tolerates its target having been removed
//! in the meantime. Deleted run ids are tombstoned until the next
//! authoritative run-list load so a late refresh response cannot
//! resurrect a deleted run.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use rv_client::{ClientError, Page, PackResolver, RunDirectory, WorkspaceDirectory};
use rv_core::{
    LiveEvent, PackHint, ResolvedPack, Run, RunId, RunOptions, RunStatus, StartRunRequest,
    StepEvent, StepMeta, StepStatus, WorkspaceDoc, WorkspaceId,
};

use crate::transition::{next_status, Trigger};

/// Hard-coded last-resort option values for `start_run`.
const FALLBACK_PACK_KEY: &str = "cobol-mainframe";
const FALLBACK_PACK_VERSION: &str = "v1.0.2";
const FALLBACK_MODEL: &str = "openai:gpt-4o-mini";

/// Session-wide option defaults scavenged from previously seen runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityDefaults {
    pub pack_key: Option<String>,
    pub pack_version: Option<String>,
    pub model: Option<String>,
}

impl CapabilityDefaults {
    fn is_complete(&self) -> bool {
        self.pack_key.is_some() && self.pack_version.is_some() && self.model.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    /// When the run is already `completed` and every resulting step is
    /// still `pending`, mark them all `completed`.
    pub mark_done_if_run_completed: bool,
}

/// Step progress summary for one run's live view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepProgress {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
    pub running: usize,
    /// Finished steps (done + failed) as a share of total, 0..=100.
    pub percent: u8,
}

pub struct RunStore<D, P, W> {
    directory: Arc<D>,
    resolver: Arc<P>,
    workspaces: Arc<W>,

    workspace_id: Option<WorkspaceId>,
    doc: Option<WorkspaceDoc>,
    runs: IndexMap<RunId, Run>,
    selected: Option<RunId>,
    capability_defaults: CapabilityDefaults,
    error: Option<String>,
    /// Runs deleted locally after server confirmation; an in-flight
    /// refresh must not reinsert them. Cleared by the next workspace
    /// switch or successful run-list load.
    tombstones: HashSet<RunId>,
}

impl<D, P, W> RunStore<D, P, W>
where
    D: RunDirectory,
    P: PackResolver,
    W: WorkspaceDirectory,
{
    pub fn new(directory: Arc<D>, resolver: Arc<P>, workspaces: Arc<W>) -> Self {
        Self {
            directory,
            resolver,
            workspaces,
            workspace_id: None,
            doc: None,
            runs: IndexMap::new(),
            selected: None,
            capability_defaults: CapabilityDefaults::default(),
            error: None,
            tombstones: HashSet::new(),
        }
    }

    // ---- accessors ----

    pub fn workspace_id(&self) -> Option<&WorkspaceId> {
        self.workspace_id.as_ref()
    }

    pub fn workspace_doc(&self) -> Option<&WorkspaceDoc> {
        self.doc.as_ref()
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.runs.values()
    }

    pub fn run(&self, run_id: &RunId) -> Option<&Run> {
        self.runs.get(run_id.as_str())
    }

    pub fn selected_run(&self) -> Option<&Run> {
        self.selected.as_ref().and_then(|id| self.runs.get(id.as_str()))
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn capability_defaults(&self) -> &CapabilityDefaults {
        &self.capability_defaults
    }

    /// Runs matching the UI search box filter, in directory order.
    pub fn filtered_runs(&self, needle: &str) -> Vec<&Run> {
        self.runs.values().filter(|r| r.matches_filter(needle)).collect()
    }

    /// A run's live steps in display order.
    pub fn step_list(&self, run_id: &RunId) -> Vec<&StepEvent> {
        let Some(run) = self.runs.get(run_id.as_str()) else {
            return Vec::new();
        };
        let mut steps: Vec<&StepEvent> = run.live_steps.values().collect();
        steps.sort_by(|a, b| StepEvent::display_order(a, b));
        steps
    }

    pub fn step_progress(&self, run_id: &RunId) -> StepProgress {
        let Some(run) = self.runs.get(run_id.as_str()) else {
            return StepProgress::default();
        };
        let mut p = StepProgress { total: run.live_steps.len(), ..Default::default() };
        for step in run.live_steps.values() {
            match step.status {
                StepStatus::Completed => p.done += 1,
                StepStatus::Failed => p.failed += 1,
                StepStatus::Started => p.running += 1,
                StepStatus::Pending => {}
            }
        }
        if p.total > 0 {
            p.percent = (100 * (p.done + p.failed) / p.total) as u8;
        }
        p
    }

    // ---- operations ----

    /// Reset all run state and, when `id` is given, load the workspace
    /// doc and run list concurrently. `None` means "no workspace
    /// selected": state clears without error.
    pub async fn switch_workspace(&mut self, id: Option<WorkspaceId>) {
        self.runs.clear();
        self.doc = None;
        self.selected = None;
        self.error = None;
        self.tombstones.clear();
        self.workspace_id = id.clone();

        let Some(id) = id else { return };

        let (doc, runs) = tokio::join!(
            self.workspaces.get_doc(&id),
            self.directory.list(&id, Page::default()),
        );
        match (doc, runs) {
            (Ok(doc), Ok(runs)) => {
                self.doc = Some(doc);
                self.install_runs(runs);
                self.derive_capability_defaults();
                tracing::info!(workspace_id = %id, runs = self.runs.len(), "workspace loaded");
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(workspace_id = %id, error = %e, "workspace load failed");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Re-fetch the run list for the current workspace and replace the
    /// collection. Live step views of retained runs are untouched.
    pub async fn load_runs(&mut self) {
        let Some(id) = self.workspace_id.clone() else { return };
        match self.directory.list(&id, Page::default()).await {
            Ok(runs) => {
                self.install_runs(runs);
                self.derive_capability_defaults();
            }
            Err(e) => {
                tracing::warn!(workspace_id = %id, error = %e, "run list load failed");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Fetch one run's full snapshot and merge it in, preserving the
    /// existing live view. Backfills step status for completed runs and
    /// seeds placeholders when no live steps exist yet.
    pub async fn refresh_run(&mut self, run_id: &RunId) {
        let snapshot = match self.directory.get(run_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(%run_id, error = %e, "run refresh failed");
                self.error = Some(e.to_string());
                return;
            }
        };
        // The run may have been deleted while the fetch was in flight.
        if self.tombstones.contains(run_id) {
            tracing::debug!(%run_id, "dropping refresh for deleted run");
            return;
        }
        self.apply_snapshot(snapshot);

        let Some(run) = self.runs.get(run_id.as_str()) else { return };
        if run.status == RunStatus::Completed
            && !run.live_steps.is_empty()
            && run.all_steps_pending()
        {
            // The run finished before any step events arrived (or they
            // were lost); force the terminal consistency fix.
            self.mark_all_steps(run_id, StepStatus::Completed);
        } else if run.live_steps.is_empty() {
            let hint = run.pack_hint();
            let playbook_id = run.playbook_id.clone();
            self.seed_from_pack(
                run_id,
                &playbook_id,
                hint,
                SeedOptions { mark_done_if_run_completed: true },
            )
            .await;
        }
    }

    /// Start a run. Fails with a validation error before any I/O when no
    /// workspace is selected; on success reloads the run list and
    /// returns the new run id if the server provided one.
    pub async fn start_run(&mut self, mut body: StartRunRequest) -> Result<RunId, ClientError> {
        let Some(workspace_id) = self.workspace_id.clone() else {
            return Err(ClientError::Validation("no workspace selected".to_string()));
        };
        if body.workspace_id.is_empty() {
            body.workspace_id = workspace_id;
        }
        body.options = Some(self.effective_options(body.options.take().unwrap_or_default()));

        let started = match self.directory.start(&body).await {
            Ok(run) => run,
            Err(e) => {
                // Surfaced verbatim for display; prior state stays intact.
                self.error = Some(e.to_string());
                return Err(e);
            }
        };
        let run_id = started.run_id.clone();
        tracing::info!(%run_id, playbook_id = %body.playbook_id, "run started");
        self.load_runs().await;

        if !run_id.is_empty() {
            let hint = self
                .runs
                .get(run_id.as_str())
                .map(|r| r.pack_hint())
                .unwrap_or_default()
                .or_else_from(&self.options_hint(body.options.as_ref()));
            self.seed_from_pack(&run_id, &body.playbook_id, hint, SeedOptions::default()).await;
        }
        Ok(run_id)
    }

    /// Delete a run. Local removal happens only after the server
    /// confirms; a failed delete leaves the run visible.
    pub async fn delete_run(&mut self, run_id: &RunId) -> Result<(), ClientError> {
        if let Err(e) = self.directory.delete(run_id).await {
            tracing::warn!(%run_id, error = %e, "run delete failed");
            self.error = Some(e.to_string());
            return Err(e);
        }
        self.runs.shift_remove(run_id.as_str());
        self.tombstones.insert(run_id.clone());
        if self.selected.as_ref() == Some(run_id) {
            self.selected = None;
        }
        tracing::info!(%run_id, "run deleted");
        Ok(())
    }

    /// Pre-populate pending placeholders for a known run and enrich
    /// already-observed steps, never touching observed status or
    /// timestamps.
    pub fn seed_live_steps(&mut self, run_id: &RunId, metas: &[StepMeta], opts: SeedOptions) {
        let Some(run) = self.runs.get_mut(run_id.as_str()) else { return };
        for meta in metas {
            if meta.id.is_empty() {
                continue;
            }
            match run.live_steps.get_mut(&meta.id) {
                Some(existing) => existing.enrich_from_meta(meta),
                None => {
                    let placeholder = StepEvent::placeholder(run_id.clone(), meta);
                    run.live_steps.insert(meta.id.clone(), placeholder);
                }
            }
        }
        if opts.mark_done_if_run_completed
            && run.status == RunStatus::Completed
            && !run.live_steps.is_empty()
            && run.all_steps_pending()
        {
            self.mark_all_steps(run_id, StepStatus::Completed);
        }
    }

    /// Live-stream entry point for step telemetry. Malformed events and
    /// events for unknown runs are ignored; the store never creates a
    /// run from a step event.
    pub fn apply_step_event(&mut self, event: &StepEvent) {
        if event.run_id.is_empty() || event.step.id.is_empty() {
            tracing::debug!("ignoring malformed step event");
            return;
        }
        let Some(run) = self.runs.get_mut(event.run_id.as_str()) else {
            tracing::debug!(run_id = %event.run_id, "step event for unknown run");
            return;
        };
        match run.live_steps.get_mut(&event.step.id) {
            Some(existing) => existing.merge_from(event),
            None => {
                run.live_steps.insert(event.step.id.clone(), event.clone());
            }
        }
        // Audit log keeps the merged view at the time of receipt.
        if let Some(merged) = run.live_steps.get(&event.step.id) {
            run.step_events.push(merged.clone());
        }
        if event.status == StepStatus::Started {
            run.status = next_status(&event.run_id, run.status, Trigger::StepStarted);
        }
    }

    /// Route one classified live-channel event.
    pub async fn handle_live_event(&mut self, event: LiveEvent) {
        match event {
            LiveEvent::Step(step) => self.apply_step_event(&step),
            LiveEvent::Lifecycle(lc) => {
                if lc.triggers_refresh() {
                    self.refresh_run(&lc.run_id).await;
                }
            }
            LiveEvent::Raw { .. } | LiveEvent::Unrecognized(_) => {
                tracing::debug!("unclassified live event");
            }
        }
    }

    /// Select a run for detail display; unknown ids clear the selection.
    pub fn select_run(&mut self, run_id: Option<RunId>) {
        self.selected = run_id.filter(|id| self.runs.contains_key(id.as_str()));
    }

    /// Scan known runs for the first observed `pack_key`,
    /// `pack_version`, and `model`; stop once all three are found.
    pub fn derive_capability_defaults(&mut self) {
        for run in self.runs.values() {
            let Some(opts) = &run.options else { continue };
            if self.capability_defaults.pack_key.is_none() {
                self.capability_defaults.pack_key = opts.pack_key.clone();
            }
            if self.capability_defaults.pack_version.is_none() {
                self.capability_defaults.pack_version = opts.pack_version.clone();
            }
            if self.capability_defaults.model.is_none() {
                self.capability_defaults.model = opts.model.clone();
            }
            if self.capability_defaults.is_complete() {
                break;
            }
        }
    }

    // ---- internals ----

    /// Replace the run collection with a fresh list, carrying each
    /// retained run's live view across and guarding status
    /// monotonicity. Clears tombstones: the list is authoritative.
    fn install_runs(&mut self, runs: Vec<Run>) {
        let mut next: IndexMap<RunId, Run> = IndexMap::with_capacity(runs.len());
        for mut incoming in runs {
            if incoming.run_id.is_empty() {
                continue;
            }
            if let Some(mut existing) = self.runs.swap_remove(incoming.run_id.as_str()) {
                incoming.status =
                    next_status(&incoming.run_id, existing.status, Trigger::Snapshot(incoming.status));
                let id = incoming.run_id.clone();
                existing.merge_snapshot(incoming);
                next.insert(id, existing);
            } else {
                next.insert(incoming.run_id.clone(), incoming);
            }
        }
        self.runs = next;
        self.tombstones.clear();
        if let Some(sel) = &self.selected {
            if !self.runs.contains_key(sel.as_str()) {
                self.selected = None;
            }
        }
    }

    /// Merge one run snapshot (insert when unknown), preserving the
    /// live view and guarding status monotonicity.
    fn apply_snapshot(&mut self, mut snapshot: Run) {
        if snapshot.run_id.is_empty() {
            return;
        }
        match self.runs.get_mut(snapshot.run_id.as_str()) {
            Some(existing) => {
                snapshot.status =
                    next_status(&snapshot.run_id, existing.status, Trigger::Snapshot(snapshot.status));
                existing.merge_snapshot(snapshot);
            }
            None => {
                self.runs.insert(snapshot.run_id.clone(), snapshot);
            }
        }
    }

    fn mark_all_steps(&mut self, run_id: &RunId, status: StepStatus) {
        if let Some(run) = self.runs.get_mut(run_id.as_str()) {
            for step in run.live_steps.values_mut() {
                step.status = status;
            }
        }
    }

    /// Layer effective run options: explicit caller values, then
    /// session capability defaults, then the hard-coded fallbacks.
    fn effective_options(&self, explicit: RunOptions) -> RunOptions {
        let defaults = &self.capability_defaults;
        RunOptions {
            pack_key: explicit
                .pack_key
                .or_else(|| defaults.pack_key.clone())
                .or_else(|| Some(FALLBACK_PACK_KEY.to_string())),
            pack_version: explicit
                .pack_version
                .or_else(|| defaults.pack_version.clone())
                .or_else(|| Some(FALLBACK_PACK_VERSION.to_string())),
            model: explicit
                .model
                .or_else(|| defaults.model.clone())
                .or_else(|| Some(FALLBACK_MODEL.to_string())),
            validate: explicit.validate.or(Some(true)),
            dry_run: explicit.dry_run.or(Some(false)),
            pack_id: explicit.pack_id,
            extra: explicit.extra,
        }
    }

    fn options_hint(&self, options: Option<&RunOptions>) -> PackHint {
        let Some(opts) = options else { return PackHint::default() };
        PackHint {
            pack_id: opts.pack_id.clone(),
            key: opts.pack_key.clone(),
            version: opts.pack_version.clone(),
        }
    }

    /// Best-effort step seeding via the capability resolver. All
    /// failures are silent; "no pack" just means no steps yet.
    async fn seed_from_pack(
        &mut self,
        run_id: &RunId,
        playbook_id: &str,
        hint: PackHint,
        opts: SeedOptions,
    ) {
        if playbook_id.is_empty() || !hint.is_usable() {
            return;
        }
        let pack = match self.resolve_hint(&hint).await {
            Some(pack) => pack,
            None => {
                tracing::debug!(%run_id, "no capability pack for step seeding");
                return;
            }
        };
        let metas = pack.step_metas(playbook_id);
        if metas.is_empty() {
            return;
        }
        self.seed_live_steps(run_id, &metas, opts);
    }

    async fn resolve_hint(&self, hint: &PackHint) -> Option<ResolvedPack> {
        if let (Some(key), Some(version)) = (&hint.key, &hint.version) {
            if let Ok(pack) = self.resolver.resolve_by_key_version(key, version).await {
                return Some(pack);
            }
        }
        let pack_id = hint.effective_id()?;
        self.resolver.get_pack(&pack_id, true).await.ok()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
