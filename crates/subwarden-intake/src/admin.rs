//! Read-side view over both stores for manual review.

use std::sync::Arc;

use serde::Serialize;
use subwarden_core::StoredApplication;
use subwarden_store::LocalStore;
use subwarden_sync::RecordStore;
use tracing::{info, warn};

/// Loads applications from the remote and local stores without touching either.
pub struct AdminView {
    remote: Arc<dyn RecordStore>,
    local: Arc<dyn LocalStore>,
}

/// Snapshot of both stores.
///
/// The same submission can appear twice (remote row plus its local backup);
/// nothing is deduplicated.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub remote: Vec<StoredApplication>,
    pub local: Vec<StoredApplication>,
    /// Set when the remote list failed; `remote` is then empty.
    pub remote_error: Option<String>,
}

/// Which store a dashboard row was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    RecordStore,
    LocalStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub remote: usize,
    pub local: usize,
}

impl AdminView {
    pub fn new(remote: Arc<dyn RecordStore>, local: Arc<dyn LocalStore>) -> Self {
        Self { remote, local }
    }

    pub async fn load(&self) -> Dashboard {
        let (remote, remote_error) = match self.remote.list().await {
            Ok(rows) => (rows, None),
            Err(e) => {
                warn!(error = %e, "could not load applications from record store");
                (Vec::new(), Some(e.to_string()))
            }
        };
        let local = self.local.list_all().await;
        info!(remote = remote.len(), local = local.len(), "loaded admin dashboard");
        Dashboard {
            remote,
            local,
            remote_error,
        }
    }
}

impl Dashboard {
    /// Remote rows first, then local ones, each tagged with its origin.
    pub fn rows(&self) -> impl Iterator<Item = (Origin, &StoredApplication)> {
        self.remote
            .iter()
            .map(|entry| (Origin::RecordStore, entry))
            .chain(self.local.iter().map(|entry| (Origin::LocalStore, entry)))
    }

    /// Remote rows first, then local ones.
    pub fn into_all(self) -> Vec<StoredApplication> {
        let mut all = self.remote;
        all.extend(self.local);
        all
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.remote.len() + self.local.len(),
            remote: self.remote.len(),
            local: self.local.len(),
        }
    }
}
