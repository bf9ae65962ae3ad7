//! Submission workflow: remote store first, local store as backup and fallback.
//!
//! The two writes are independent attempts with no transaction between them.
//! The guarantee is that at least one of the two stores holds the record
//! unless both fail, in which case the caller gets [`SubmitError::Unsaved`].

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use subwarden_core::{FormState, RecordId, StoredApplication, ValidationError};
use subwarden_store::{LocalStore, StoreError};
use subwarden_sync::{RecordStore, RemoteError};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::ids::LocalIdGenerator;

/// Where the authoritative copy of a submission lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Remote,
    LocalFallback,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: RecordId,
    pub source: Source,
    pub stored: StoredApplication,
    /// Whether the local copy was written. Always true for local-fallback
    /// submissions; for remote ones it reports the backup write.
    pub backup_saved: bool,
    /// Why the remote save failed, for local-fallback submissions.
    pub remote_error: Option<String>,
}

impl Submission {
    /// Notice to show the applicant.
    pub fn notice(&self) -> &'static str {
        match self.source {
            Source::Remote => "Your application has been submitted successfully.",
            Source::LocalFallback => {
                "Your application was saved locally and is pending sync to the record store."
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Both stores failed. Nothing was persisted.
    #[error(
        "your application could not be saved; please try again or contact support \
         (record store: {remote}; local store: {local})"
    )]
    Unsaved {
        remote: RemoteError,
        #[source]
        local: StoreError,
    },
}

/// Turns completed form state into exactly one persisted application.
pub struct SubmissionWorkflow {
    remote: Arc<dyn RecordStore>,
    local: Arc<dyn LocalStore>,
    ids: LocalIdGenerator,
}

impl SubmissionWorkflow {
    pub fn new(remote: Arc<dyn RecordStore>, local: Arc<dyn LocalStore>) -> Self {
        Self {
            remote,
            local,
            ids: LocalIdGenerator::new(),
        }
    }

    /// Advance the local id generator past every plausible local id already
    /// stored, so ids from earlier runs are never handed out again.
    pub async fn resume_local_ids(&self) {
        let ignored = self
            .local
            .list_all()
            .await
            .iter()
            .filter_map(|entry| entry.id.local_millis())
            .filter(|&millis| !self.ids.observe(millis))
            .count();
        if ignored > 0 {
            warn!(ignored, "ignoring implausible local ids in local store");
        }
    }

    /// Validate and persist one application.
    ///
    /// Only precondition violations and total persistence failure are errors;
    /// a remote failure alone is recovered by the local store.
    pub async fn submit(&self, form: &FormState) -> Result<Submission, SubmitError> {
        let now = Utc::now();
        let record = form.to_record(now)?;

        match self.remote.create(&record).await {
            Ok(id) => {
                let stored = StoredApplication::new(id.clone(), record, now);
                let backup_saved = match self.local.append(stored.clone()).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(id = %id, error = %e, "remote save succeeded but local backup failed");
                        false
                    }
                };
                info!(id = %id, backup_saved, "application submitted to record store");
                Ok(Submission {
                    id,
                    source: Source::Remote,
                    stored,
                    backup_saved,
                    remote_error: None,
                })
            }
            Err(remote) => {
                warn!(error = %remote, "remote save failed, falling back to local store");
                let id = self.ids.next_id();
                let stored = StoredApplication::new(id.clone(), record, now);
                match self.local.append(stored.clone()).await {
                    Ok(()) => {
                        info!(id = %id, "application saved locally, pending sync");
                        Ok(Submission {
                            id,
                            source: Source::LocalFallback,
                            stored,
                            backup_saved: true,
                            remote_error: Some(remote.to_string()),
                        })
                    }
                    Err(local) => {
                        error!(remote = %remote, local = %local, "application could not be saved anywhere");
                        Err(SubmitError::Unsaved { remote, local })
                    }
                }
            }
        }
    }
}
