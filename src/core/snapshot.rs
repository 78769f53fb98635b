//! Pure capture and restore transforms

use crate::config::Settings;
use crate::data::TabRecord;
use crate::host::{CreateTabRequest, LiveTab, TabId};

/// Inclusion policy applied when turning live tabs into records and
/// when deciding which stored records are restorable.
#[derive(Debug, Clone)]
pub struct CapturePolicy {
    internal_scheme: String,
    blank_url: String,
}

impl CapturePolicy {
    pub fn new(internal_scheme: impl Into<String>, blank_url: impl Into<String>) -> Self {
        Self {
            internal_scheme: internal_scheme.into(),
            blank_url: blank_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.internal_scheme, &settings.blank_url)
    }

    /// The address a tab should be captured under: the pending URL when
    /// a navigation is still in flight, else the committed URL.
    pub fn effective_url(tab: &LiveTab) -> String {
        tab.pending_url
            .clone()
            .or_else(|| tab.url.clone())
            .unwrap_or_default()
    }

    /// Whether a live tab belongs in the capture. Pinned tabs stay with
    /// the window; internal pages are dropped except the blank page.
    pub fn includes(&self, url: &str, pinned: bool) -> bool {
        if pinned {
            return false;
        }
        !url.starts_with(&self.internal_scheme) || url == self.blank_url
    }

    /// Whether a stored record may be re-opened. Tolerates legacy and
    /// malformed entries: empty URLs and internal non-blank pages are
    /// dropped at restore time as well.
    pub fn restorable(&self, record: &TabRecord) -> bool {
        !record.url.is_empty() && self.includes(&record.url, false)
    }

    pub fn is_blank(&self, url: &str) -> bool {
        url == self.blank_url
    }
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self::new("about:", "about:blank")
    }
}

/// Result of one capture: the records to persist and the ids of the
/// tabs they came from (the set a swap will close).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub records: Vec<TabRecord>,
    pub close_ids: Vec<TabId>,
}

/// Turns the live inventory into restorable records, applying the
/// inclusion policy and preserving inventory order. Deterministic and
/// side-effect free.
pub fn capture(tabs: &[LiveTab], policy: &CapturePolicy) -> Capture {
    let mut records = Vec::new();
    let mut close_ids = Vec::new();

    for tab in tabs {
        let url = CapturePolicy::effective_url(tab);
        if !policy.includes(&url, tab.pinned) {
            continue;
        }
        records.push(TabRecord {
            url,
            pinned: tab.pinned,
            context_id: tab.context_id.clone(),
        });
        close_ids.push(tab.id);
    }

    Capture { records, close_ids }
}

/// Maps records back to creation requests, carrying `pinned` only when
/// true and the context id only when present so the host applies its
/// own defaults for the rest.
pub fn materialize(records: &[TabRecord]) -> Vec<CreateTabRequest> {
    records
        .iter()
        .map(|record| CreateTabRequest {
            url: record.url.clone(),
            pinned: record.pinned.then_some(true),
            context_id: record.context_id.clone(),
            active: None,
        })
        .collect()
}
