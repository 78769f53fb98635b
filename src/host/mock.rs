//! Mock host collaborators for deterministic testing
//!
//! Implements `TabHost` and `IconSurface` against an in-memory window
//! so engine flows can be exercised without a real browser. All
//! interactions are captured for later verification, and individual
//! operations can be made to fail.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::host::icon::{IconError, IconKind, IconSurface};
use crate::host::tabs::{CreateTabRequest, LiveTab, TabError, TabHost, TabId};

/// In-memory tab host simulating one window.
#[derive(Default)]
pub struct MockTabHost {
    tabs: Mutex<Vec<LiveTab>>,
    next_id: AtomicU64,
    /// Captured creation requests for verification
    created: Mutex<Vec<CreateTabRequest>>,
    /// Captured removal batches for verification
    removed: Mutex<Vec<Vec<TabId>>>,
    fail_query: AtomicBool,
    fail_remove: AtomicBool,
    fail_create_urls: Mutex<HashSet<String>>,
}

impl MockTabHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an unpinned tab with a committed URL and returns its id.
    pub fn seed(&self, url: &str) -> TabId {
        self.seed_tab(LiveTab::new(TabId::new(0), url))
    }

    /// Seeds a pinned tab and returns its id.
    pub fn seed_pinned(&self, url: &str) -> TabId {
        let mut tab = LiveTab::new(TabId::new(0), url);
        tab.pinned = true;
        self.seed_tab(tab)
    }

    /// Seeds a fully specified tab; the id field is replaced with a fresh one.
    pub fn seed_tab(&self, mut tab: LiveTab) -> TabId {
        let id = self.allocate_id();
        tab.id = id;
        self.tabs.lock().push(tab);
        id
    }

    /// Configure the mock to fail `query_tabs`.
    pub fn failing_query(self) -> Self {
        self.fail_query.store(true, Ordering::SeqCst);
        self
    }

    /// Configure the mock to fail `remove_tabs`.
    pub fn failing_remove(self) -> Self {
        self.fail_remove.store(true, Ordering::SeqCst);
        self
    }

    /// Configure the mock to fail creation of tabs with the given URL.
    pub fn failing_create(self, url: &str) -> Self {
        self.fail_create_urls.lock().insert(url.to_string());
        self
    }

    /// URLs of the tabs currently open, in window order.
    pub fn open_urls(&self) -> Vec<String> {
        self.tabs
            .lock()
            .iter()
            .map(|tab| tab.url.clone().unwrap_or_default())
            .collect()
    }

    /// Whether the given tab is still open.
    pub fn has_tab(&self, id: TabId) -> bool {
        self.tabs.lock().iter().any(|tab| tab.id == id)
    }

    /// Creation requests captured so far.
    pub fn created_requests(&self) -> Vec<CreateTabRequest> {
        self.created.lock().clone()
    }

    /// Removal batches captured so far.
    pub fn removed_batches(&self) -> Vec<Vec<TabId>> {
        self.removed.lock().clone()
    }

    fn allocate_id(&self) -> TabId {
        TabId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl TabHost for MockTabHost {
    async fn query_tabs(&self) -> Result<Vec<LiveTab>, TabError> {
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(TabError::Query("mock query failure".into()));
        }
        Ok(self.tabs.lock().clone())
    }

    async fn create_tab(&self, request: CreateTabRequest) -> Result<TabId, TabError> {
        if self.fail_create_urls.lock().contains(&request.url) {
            return Err(TabError::Create {
                url: request.url,
                reason: "mock create failure".into(),
            });
        }
        let id = self.allocate_id();
        self.tabs.lock().push(LiveTab {
            id,
            url: Some(request.url.clone()),
            pending_url: None,
            pinned: request.pinned.unwrap_or(false),
            context_id: request.context_id.clone(),
        });
        self.created.lock().push(request);
        Ok(id)
    }

    async fn remove_tabs(&self, ids: &[TabId]) -> Result<(), TabError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(TabError::Remove("mock removal failure".into()));
        }
        self.tabs.lock().retain(|tab| !ids.contains(&tab.id));
        self.removed.lock().push(ids.to_vec());
        Ok(())
    }
}

/// Icon surface that records every icon it is asked to show.
#[derive(Default)]
pub struct MockIconSurface {
    icons: Mutex<Vec<IconKind>>,
    fail: AtomicBool,
}

impl MockIconSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// Icons set so far, oldest first.
    pub fn icons_set(&self) -> Vec<IconKind> {
        self.icons.lock().clone()
    }

    /// The icon currently showing, if any was ever set.
    pub fn current(&self) -> Option<IconKind> {
        self.icons.lock().last().copied()
    }
}

#[async_trait]
impl IconSurface for MockIconSurface {
    async fn set_icon(&self, icon: IconKind) -> Result<(), IconError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(IconError("mock icon failure".into()));
        }
        self.icons.lock().push(icon);
        Ok(())
    }
}
