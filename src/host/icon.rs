use async_trait::async_trait;
use thiserror::Error;

use crate::data::WorkspaceSlot;

/// Which toolbar icon to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    /// The icon for one of the two workspaces.
    Workspace(WorkspaceSlot),
    /// Transient icon shown while a swap is settling.
    Settling,
}

#[derive(Error, Debug)]
#[error("icon update failed: {0}")]
pub struct IconError(pub String);

/// Interface to the host's toolbar-icon surface.
#[async_trait]
pub trait IconSurface: Send + Sync {
    async fn set_icon(&self, icon: IconKind) -> Result<(), IconError>;
}
