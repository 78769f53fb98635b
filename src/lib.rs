pub mod config;
pub mod core;
pub mod data;
pub mod host;

pub use config::{ConfigError, Settings};
pub use self::core::{
    capture, materialize, BestEffort, Capture, CapturePolicy, EngineSignal, LifecycleHooks,
    LockoutGuard, ToggleEngine, ToggleOutcome, ToggleState,
};
pub use data::{
    DatabaseError, KeyValueStore, MemoryStore, SqliteStore, StoreError, TabRecord, WorkspaceSlot,
    WorkspaceStore,
};
pub use host::{
    CreateTabRequest, IconError, IconKind, IconSurface, LiveTab, TabError, TabHost, TabId,
};
