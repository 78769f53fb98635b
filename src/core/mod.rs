pub mod best_effort;
pub mod engine;
pub mod guard;
pub mod lifecycle;
pub mod snapshot;

pub use best_effort::BestEffort;
pub use engine::{ToggleEngine, ToggleError, ToggleOutcome};
pub use guard::{LockoutGuard, ToggleState};
pub use lifecycle::{EngineSignal, LifecycleHooks};
pub use snapshot::{capture, materialize, Capture, CapturePolicy};
