pub mod database;
pub mod models;
pub mod store;
pub mod workspace;

pub use database::{DatabaseError, SqliteStore};
pub use models::{TabRecord, WorkspaceSlot};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use workspace::WorkspaceStore;
