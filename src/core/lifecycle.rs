//! Install, startup, and autosave hooks

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

use crate::core::engine::ToggleEngine;
use crate::core::guard::ToggleState;
use crate::core::snapshot;
use crate::data::{TabRecord, WorkspaceSlot};
use crate::host::IconKind;

/// External events adapted onto engine operations. The host's event
/// sources (toolbar click, timers) send these; they are not part of the
/// engine's own control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSignal {
    Toggle,
    Autosave,
}

/// Install-time initialization, startup-time restoration, and the
/// periodic autosave refresh.
pub struct LifecycleHooks {
    engine: Arc<ToggleEngine>,
}

impl LifecycleHooks {
    pub fn new(engine: Arc<ToggleEngine>) -> Self {
        Self { engine }
    }

    /// Runs once per installation: the primary workspace starts active.
    pub async fn install(&self) {
        let engine = &self.engine;
        engine.set_active(WorkspaceSlot::Primary);
        if let Err(e) = engine.store().save_mode(WorkspaceSlot::Primary).await {
            warn!(error = %e, "initial mode not persisted");
        }
        engine
            .tolerance()
            .run(
                "set workspace icon",
                engine
                    .icons()
                    .set_icon(IconKind::Workspace(WorkspaceSlot::Primary)),
            )
            .await;
        info!("installed, primary workspace active");
    }

    /// Restores the last active workspace into the window. The other
    /// workspace is not touched.
    pub async fn startup(&self) {
        let engine = &self.engine;
        let mode = engine.store().load_mode().await;
        engine.set_active(mode);
        info!(workspace = %mode, "restoring workspace at startup");

        let policy = engine.policy();
        let records: Vec<TabRecord> = engine
            .store()
            .load_tabs(mode)
            .await
            .into_iter()
            .filter(|record| policy.restorable(record))
            .collect();

        let mut opened = 0usize;
        for request in snapshot::materialize(&records) {
            if engine
                .tolerance()
                .run("open restored tab", engine.host().create_tab(request))
                .await
                .is_some()
            {
                opened += 1;
            }
        }
        debug!(opened, "startup restore complete");

        engine
            .tolerance()
            .run(
                "set workspace icon",
                engine.icons().set_icon(IconKind::Workspace(mode)),
            )
            .await;
    }

    /// Refreshes the currently active workspace's stored snapshot. This
    /// is not a swap: it never creates or removes tabs, never touches
    /// the other workspace, and never flips the mode. Skipped entirely
    /// while a toggle is in flight or cooling down, which is the sole
    /// guard against racing one.
    pub async fn autosave(&self) {
        let engine = &self.engine;
        if engine.state() != ToggleState::Idle {
            debug!("autosave skipped while a swap is settling");
            return;
        }

        let live = match engine.host().query_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                warn!(error = %e, "autosave could not read the tab inventory");
                return;
            }
        };

        let slot = engine.active_slot();
        let outgoing = snapshot::capture(&live, engine.policy());
        if let Err(e) = engine.store().save_tabs(slot, &outgoing.records).await {
            warn!(error = %e, workspace = %slot, "autosave write failed");
        }
        // The mode rarely changes outside a toggle; re-persisting it
        // here heals a pointer lost to a failed write.
        if let Err(e) = engine.store().save_mode(slot).await {
            warn!(error = %e, "active mode refresh failed");
        }
    }

    /// Spawns the adapter loop: listens for host signals and fires the
    /// periodic autosave. Runs until the signal channel closes.
    pub fn spawn(self: Arc<Self>, mut signals: mpsc::Receiver<EngineSignal>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let period = self.engine.settings().autosave_interval();
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    signal = signals.recv() => match signal {
                        Some(EngineSignal::Toggle) => {
                            let _ = self.engine.toggle().await;
                        }
                        Some(EngineSignal::Autosave) => self.autosave().await,
                        None => break,
                    },
                    _ = ticker.tick() => self.autosave().await,
                }
            }
        })
    }
}
