//! Local fallback storage: an append-only list of submitted applications.
//!
//! The submission workflow depends only on the [`LocalStore`] port. Adapters:
//! [`JsonFileStore`] keeps the list in one JSON file, [`MemoryStore`] keeps it
//! in process memory.

use async_trait::async_trait;
use subwarden_core::StoredApplication;

mod error;
mod json_file;
mod memory;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Append-only sequence of stored applications.
///
/// Reads never fail: storage that is absent or unreadable reads as empty.
/// Only [`append`](Self::append) reports errors, because a failed write is the
/// one case where a submission has nowhere left to go.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Add one entry at the end of the sequence.
    async fn append(&self, entry: StoredApplication) -> Result<(), StoreError>;

    /// All entries in insertion order.
    async fn list_all(&self) -> Vec<StoredApplication>;

    async fn count(&self) -> usize {
        self.list_all().await.len()
    }
}
