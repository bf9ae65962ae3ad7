//! Remote record store: the primary persistence path for applications.

use async_trait::async_trait;
use subwarden_core::{ApplicationRecord, RecordId, StoredApplication};

mod config;
mod error;
pub mod http;

pub use config::{DEFAULT_API_URL, DEFAULT_TABLE, RemoteConfig};
pub use error::RemoteError;
pub use http::RecordStoreClient;

/// A remote tabular store of applications.
///
/// One call is one attempt: implementations do not retry.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a record and return the id the store assigned to it.
    async fn create(&self, record: &ApplicationRecord) -> Result<RecordId, RemoteError>;

    /// Every record in the store, in the order the store returns them.
    async fn list(&self) -> Result<Vec<StoredApplication>, RemoteError>;
}

/// Stand-in used when no remote credentials are configured.
///
/// Every call fails with [`RemoteError::NotConfigured`], which sends
/// submissions down the local fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredStore;

#[async_trait]
impl RecordStore for UnconfiguredStore {
    async fn create(&self, _record: &ApplicationRecord) -> Result<RecordId, RemoteError> {
        Err(RemoteError::NotConfigured)
    }

    async fn list(&self) -> Result<Vec<StoredApplication>, RemoteError> {
        Err(RemoteError::NotConfigured)
    }
}
