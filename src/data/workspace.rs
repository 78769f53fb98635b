//! Workspace persistence over the key-value store

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::models::{TabRecord, WorkspaceSlot};
use super::store::{KeyValueStore, StoreError};

/// Key holding the per-workspace tab-record lists.
pub const WORKSPACE_KEY: &str = "workspaceData";
/// Key holding the active-mode pointer.
pub const MODE_KEY: &str = "currentMode";

/// Schema-aware persistence for the two workspaces and the active-mode
/// pointer. Loads never fail: an unreadable or malformed store degrades
/// to empty defaults with a logged warning.
#[derive(Clone)]
pub struct WorkspaceStore {
    store: Arc<dyn KeyValueStore>,
}

impl WorkspaceStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the persisted records for `slot`, or empty if never saved.
    pub async fn load_tabs(&self, slot: WorkspaceSlot) -> Vec<TabRecord> {
        let data = match self.store.get(WORKSPACE_KEY).await {
            Ok(Some(value)) => value,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "workspace data unreadable, treating as empty");
                return Vec::new();
            }
        };

        let Some(entry) = data.get(slot.index().to_string()) else {
            return Vec::new();
        };
        match serde_json::from_value::<Vec<TabRecord>>(entry.clone()) {
            Ok(records) => {
                debug!(workspace = %slot, tabs = records.len(), "loaded saved tabs");
                records
            }
            Err(e) => {
                warn!(error = %e, workspace = %slot, "malformed workspace entry, treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrites the stored records for `slot` wholesale. The other
    /// workspace's entry is carried over untouched.
    pub async fn save_tabs(
        &self,
        slot: WorkspaceSlot,
        records: &[TabRecord],
    ) -> Result<(), StoreError> {
        let mut data = match self.store.get(WORKSPACE_KEY).await {
            Ok(Some(Value::Object(map))) => map,
            Ok(_) => Map::new(),
            Err(e) => {
                warn!(error = %e, "workspace data unreadable, starting fresh");
                Map::new()
            }
        };

        let encoded =
            serde_json::to_value(records).map_err(|e| StoreError::Write(e.to_string()))?;
        data.insert(slot.index().to_string(), encoded);
        self.store.set(WORKSPACE_KEY, Value::Object(data)).await?;
        debug!(workspace = %slot, tabs = records.len(), "saved workspace tabs");
        Ok(())
    }

    /// Returns the persisted active mode, or the primary workspace if
    /// absent or unreadable.
    pub async fn load_mode(&self) -> WorkspaceSlot {
        match self.store.get(MODE_KEY).await {
            Ok(Some(value)) => value
                .as_u64()
                .map(|raw| WorkspaceSlot::from(raw as u8))
                .unwrap_or_default(),
            Ok(None) => WorkspaceSlot::Primary,
            Err(e) => {
                warn!(error = %e, "active mode unreadable, defaulting to primary");
                WorkspaceSlot::Primary
            }
        }
    }

    /// Persists the new active mode.
    pub async fn save_mode(&self, slot: WorkspaceSlot) -> Result<(), StoreError> {
        self.store.set(MODE_KEY, Value::from(slot.index())).await
    }
}
