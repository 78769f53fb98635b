//! Toggle orchestration

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::core::best_effort::BestEffort;
use crate::core::guard::{LockoutGuard, ToggleState};
use crate::core::snapshot::{self, CapturePolicy};
use crate::data::{StoreError, TabRecord, WorkspaceSlot, WorkspaceStore};
use crate::host::{CreateTabRequest, IconKind, IconSurface, TabError, TabHost};

/// Internal failure reasons for an aborted swap. Never surfaced to the
/// caller; observable only through diagnostics.
#[derive(Error, Debug)]
pub enum ToggleError {
    #[error("tab inventory unavailable: {0}")]
    Inventory(TabError),
    #[error("failed to persist the outgoing workspace: {0}")]
    Persist(StoreError),
    #[error("placeholder tab not created: {0}")]
    Placeholder(TabError),
}

/// What a `toggle()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The swap completed; the given workspace is now live.
    Switched(WorkspaceSlot),
    /// Rejected by the lockout; nothing happened.
    Rejected,
    /// Entered but aborted; the lockout was released.
    Aborted,
}

/// Orchestrates one complete workspace swap: capture the live tabs,
/// persist them, materialize the other workspace, flip the active
/// pointer. Owns all mutable engine state, so independent windows can
/// run independent engines.
pub struct ToggleEngine {
    host: Arc<dyn TabHost>,
    icons: Arc<dyn IconSurface>,
    store: WorkspaceStore,
    guard: LockoutGuard,
    settings: Settings,
    policy: CapturePolicy,
    tolerance: BestEffort,
    active: Mutex<WorkspaceSlot>,
}

impl ToggleEngine {
    pub fn new(
        host: Arc<dyn TabHost>,
        icons: Arc<dyn IconSurface>,
        store: WorkspaceStore,
        settings: Settings,
    ) -> Self {
        let policy = CapturePolicy::from_settings(&settings);
        Self {
            host,
            icons,
            store,
            guard: LockoutGuard::new(),
            settings,
            policy,
            tolerance: BestEffort,
            active: Mutex::new(WorkspaceSlot::Primary),
        }
    }

    /// The workspace currently live in the window.
    pub fn active_slot(&self) -> WorkspaceSlot {
        *self.active.lock()
    }

    /// Current lockout state.
    pub fn state(&self) -> ToggleState {
        self.guard.state()
    }

    pub(crate) fn set_active(&self, slot: WorkspaceSlot) {
        *self.active.lock() = slot;
    }

    pub(crate) fn store(&self) -> &WorkspaceStore {
        &self.store
    }

    pub(crate) fn host(&self) -> &Arc<dyn TabHost> {
        &self.host
    }

    pub(crate) fn icons(&self) -> &Arc<dyn IconSurface> {
        &self.icons
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn policy(&self) -> &CapturePolicy {
        &self.policy
    }

    pub(crate) fn tolerance(&self) -> &BestEffort {
        &self.tolerance
    }

    /// Swaps the live window to the other workspace.
    ///
    /// Spamming the trigger is safe: a call landing while a swap is in
    /// flight or cooling down is a silent no-op. Failures degrade to
    /// [`ToggleOutcome::Aborted`] with the lockout released, never to a
    /// stuck `Busy` state.
    pub async fn toggle(&self) -> ToggleOutcome {
        if !self.guard.try_enter() {
            debug!("toggle rejected while a swap is in flight or cooling down");
            return ToggleOutcome::Rejected;
        }

        match self.run_swap().await {
            Ok(target) => {
                info!(workspace = %target, "switched workspace");
                ToggleOutcome::Switched(target)
            }
            Err(e) => {
                warn!(error = %e, "toggle aborted, window left unchanged");
                self.guard.release();
                ToggleOutcome::Aborted
            }
        }
    }

    async fn run_swap(&self) -> Result<WorkspaceSlot, ToggleError> {
        let source = self.active_slot();
        let target = source.other();

        let live = self
            .host
            .query_tabs()
            .await
            .map_err(ToggleError::Inventory)?;
        let outgoing = snapshot::capture(&live, &self.policy);

        // Size the cooldown from everything this swap will close plus
        // everything it will (re)create, then start it: heavier swaps
        // get proportionally longer protection.
        let stored_target = self.store.load_tabs(target).await;
        let total_tabs = outgoing.records.len() + stored_target.len();
        self.guard.schedule_exit(self.settings.cooldown_for(total_tabs));
        self.tolerance
            .run("set settling icon", self.icons.set_icon(IconKind::Settling))
            .await;

        // The outgoing workspace must be durable before anything closes.
        self.store
            .save_tabs(source, &outgoing.records)
            .await
            .map_err(ToggleError::Persist)?;
        debug!(workspace = %source, tabs = outgoing.records.len(), "outgoing workspace persisted");

        // The placeholder keeps the window from ever reaching zero tabs.
        // Without it we must not close anything, so this failure aborts.
        let placeholder = self
            .host
            .create_tab(CreateTabRequest::background_blank(&self.settings.blank_url))
            .await
            .map_err(ToggleError::Placeholder)?;

        if !outgoing.close_ids.is_empty() {
            self.tolerance
                .run(
                    "close outgoing tabs",
                    self.host.remove_tabs(&outgoing.close_ids),
                )
                .await;
        }

        let mut incoming = self.store.load_tabs(target).await;
        if incoming.is_empty() {
            // A never-populated workspace converges to one blank tab,
            // and the substitution is persisted so it stays stable.
            incoming = vec![TabRecord::new(&self.settings.blank_url)];
            if let Err(e) = self.store.save_tabs(target, &incoming).await {
                warn!(error = %e, workspace = %target, "blank substitution not persisted");
            }
        }

        let mut created = 0usize;
        let mut blank_standins = 0usize;
        for request in snapshot::materialize(&incoming) {
            if self.policy.is_blank(&request.url) {
                // The placeholder already provides a blank tab.
                blank_standins += 1;
                continue;
            }
            if self
                .tolerance
                .run("open restored tab", self.host.create_tab(request))
                .await
                .is_some()
            {
                created += 1;
            }
        }
        debug!(workspace = %target, opened = created, "incoming workspace restored");

        if blank_standins == 0 && created > 0 {
            self.tolerance
                .run("close placeholder tab", self.host.remove_tabs(&[placeholder]))
                .await;
        }

        self.set_active(target);
        if let Err(e) = self.store.save_mode(target).await {
            // Tab lists are already consistent; the stale pointer heals
            // on the next successful toggle or autosave tick.
            warn!(error = %e, "active mode not persisted");
        }
        self.tolerance
            .run(
                "set workspace icon",
                self.icons.set_icon(IconKind::Workspace(target)),
            )
            .await;

        Ok(target)
    }
}
