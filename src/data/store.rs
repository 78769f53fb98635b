//! Key-value persistence boundary

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the persistence collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),
    #[error("store write failed: {0}")]
    Write(String),
}

/// Durable get/set of structured values by key.
///
/// Keys are written independently; there is no transaction spanning
/// multiple keys, and the policy per key is last writer wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// In-memory store used by tests. Captures written keys and can be
/// configured to fail reads, all writes, or writes of a single key.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
    written: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_write_keys: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the store to fail every read.
    pub fn failing_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    /// Configure the store to fail every write.
    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Configure the store to fail writes of one key only.
    pub fn failing_writes_for(self, key: &str) -> Self {
        self.fail_write_keys.lock().insert(key.to_string());
        self
    }

    /// Keys written so far, in write order.
    pub fn written_keys(&self) -> Vec<String> {
        self.written.lock().clone()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("injected read failure".into()));
        }
        Ok(self.values.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) || self.fail_write_keys.lock().contains(key) {
            return Err(StoreError::Write("injected write failure".into()));
        }
        self.values.lock().insert(key.to_string(), value);
        self.written.lock().push(key.to_string());
        Ok(())
    }
}
