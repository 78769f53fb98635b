use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Stable identifier for a tab in the host window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TabId(u64);

impl TabId {
    /// Creates a new `TabId` from a raw numeric value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One tab as reported by the host's inventory.
///
/// `url` is the committed URL; `pending_url` is set while a navigation is
/// still in flight and takes precedence when reading the tab's address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveTab {
    pub id: TabId,
    pub url: Option<String>,
    pub pending_url: Option<String>,
    pub pinned: bool,
    /// Isolated browsing context the tab belongs to, if any.
    pub context_id: Option<String>,
}

impl LiveTab {
    /// Convenience constructor for an unpinned tab with a committed URL.
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: Some(url.into()),
            pending_url: None,
            pinned: false,
            context_id: None,
        }
    }
}

/// Request to open one tab. Optional fields are omitted (left `None`)
/// rather than defaulted, so the host applies its own defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTabRequest {
    pub url: String,
    pub pinned: Option<bool>,
    pub context_id: Option<String>,
    pub active: Option<bool>,
}

impl CreateTabRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pinned: None,
            context_id: None,
            active: None,
        }
    }

    /// Request for a blank tab opened without stealing focus.
    pub fn background_blank(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pinned: None,
            context_id: None,
            active: Some(false),
        }
    }
}

/// Errors surfaced by the tab collaborator.
#[derive(Error, Debug)]
pub enum TabError {
    #[error("tab query failed: {0}")]
    Query(String),
    #[error("tab create failed for {url}: {reason}")]
    Create { url: String, reason: String },
    #[error("tab removal failed: {0}")]
    Remove(String),
}

/// Interface to the host's tab inventory and lifecycle operations.
///
/// The engine only ever looks at the current window; multi-window hosts
/// supply one `TabHost` per logical window.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Enumerates the tabs currently open in the window.
    async fn query_tabs(&self) -> Result<Vec<LiveTab>, TabError>;

    /// Opens one tab and returns its id.
    async fn create_tab(&self, request: CreateTabRequest) -> Result<TabId, TabError>;

    /// Removes the given tabs in one call where the host allows it.
    async fn remove_tabs(&self, ids: &[TabId]) -> Result<(), TabError>;
}
