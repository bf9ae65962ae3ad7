use std::sync::Mutex;

use async_trait::async_trait;
use subwarden_core::StoredApplication;
use tracing::debug;

use crate::{LocalStore, StoreError};

/// Process-memory local store. Contents vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<StoredApplication>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries, e.g. a snapshot loaded elsewhere.
    pub fn with_entries(entries: Vec<StoredApplication>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn append(&self, entry: StoredApplication) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Other("memory store lock poisoned".into()))?;
        debug!(id = %entry.id, "appended to memory store");
        entries.push(entry);
        Ok(())
    }

    async fn list_all(&self) -> Vec<StoredApplication> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}
