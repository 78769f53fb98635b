//! Persisted data models

use std::fmt;

use serde::{Deserialize, Serialize};

/// One restorable tab. Immutable once captured; every capture builds
/// fresh records rather than mutating old ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    pub url: String,
    #[serde(default)]
    pub pinned: bool,
    /// Isolated browsing context; absent means the default context.
    #[serde(
        default,
        rename = "contextId",
        skip_serializing_if = "Option::is_none"
    )]
    pub context_id: Option<String>,
}

impl TabRecord {
    /// Unpinned record in the default context.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pinned: false,
            context_id: None,
        }
    }
}

/// One of the two workspaces. Persisted as integer 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkspaceSlot {
    #[default]
    Primary,
    Alternate,
}

impl WorkspaceSlot {
    /// The other workspace.
    pub fn other(self) -> Self {
        match self {
            WorkspaceSlot::Primary => WorkspaceSlot::Alternate,
            WorkspaceSlot::Alternate => WorkspaceSlot::Primary,
        }
    }

    /// Persisted index value.
    pub fn index(self) -> u8 {
        match self {
            WorkspaceSlot::Primary => 0,
            WorkspaceSlot::Alternate => 1,
        }
    }
}

impl From<u8> for WorkspaceSlot {
    /// Anything other than 1 degrades to the primary workspace, matching
    /// the "absent means 0" contract of the persisted mode pointer.
    fn from(raw: u8) -> Self {
        match raw {
            1 => WorkspaceSlot::Alternate,
            _ => WorkspaceSlot::Primary,
        }
    }
}

impl fmt::Display for WorkspaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_id_omitted_when_absent() {
        let record = TabRecord::new("about:blank");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("contextId").is_none());
        assert_eq!(value.get("pinned"), Some(&serde_json::Value::Bool(false)));
    }

    #[test]
    fn context_id_round_trips_when_present() {
        let record = TabRecord {
            url: "https://example.com".into(),
            pinned: false,
            context_id: Some("container-4".into()),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value.get("contextId").and_then(|v| v.as_str()),
            Some("container-4")
        );

        let back: TabRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn missing_optional_fields_deserialize_to_defaults() {
        let back: TabRecord = serde_json::from_str(r#"{"url":"https://a"}"#).unwrap();
        assert!(!back.pinned);
        assert!(back.context_id.is_none());
    }

    #[test]
    fn slot_flips_and_degrades() {
        assert_eq!(WorkspaceSlot::Primary.other(), WorkspaceSlot::Alternate);
        assert_eq!(WorkspaceSlot::Alternate.other(), WorkspaceSlot::Primary);
        assert_eq!(WorkspaceSlot::from(1), WorkspaceSlot::Alternate);
        assert_eq!(WorkspaceSlot::from(0), WorkspaceSlot::Primary);
        assert_eq!(WorkspaceSlot::from(7), WorkspaceSlot::Primary);
    }
}
