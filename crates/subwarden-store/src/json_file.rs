//! JSON-file adapter for the local fallback store.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use subwarden_core::StoredApplication;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{LocalStore, StoreError};

/// Local store backed by a single JSON file holding the whole sequence.
///
/// Every append reads the file, pushes one entry and rewrites it. Appends are
/// serialized through an in-process mutex so two submissions racing on the
/// same store cannot drop each other's entry, and each rewrite goes through a
/// temp file + rename so a crash never leaves a truncated file behind.
///
/// Other processes writing the same file are not coordinated.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Use the file at `path`. Nothing is touched until the first append.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the sequence, distinguishing "absent" (empty) from "corrupt" (error).
    pub async fn read(&self) -> Result<Vec<StoredApplication>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Move an unreadable file aside so the next write does not destroy it.
    async fn quarantine(&self) -> Result<PathBuf, StoreError> {
        let stamp = Utc::now().timestamp_millis();
        let mut aside = self.path.clone().into_os_string();
        aside.push(format!(".corrupt-{stamp}"));
        let aside = PathBuf::from(aside);
        tokio::fs::rename(&self.path, &aside).await?;
        Ok(aside)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl LocalStore for JsonFileStore {
    async fn append(&self, entry: StoredApplication) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = match self.read().await {
            Ok(entries) => entries,
            Err(StoreError::Json(e)) => {
                let aside = self.quarantine().await?;
                warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    error = %e,
                    "local store was corrupt, starting a fresh sequence"
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let id = entry.id.clone();
        entries.push(entry);
        let bytes = serde_json::to_vec_pretty(&entries)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes)).await??;

        info!(id = %id, count = entries.len(), path = %self.path.display(), "appended to local store");
        Ok(())
    }

    async fn list_all(&self) -> Vec<StoredApplication> {
        match self.read().await {
            Ok(entries) => {
                debug!(count = entries.len(), path = %self.path.display(), "read local store");
                entries
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "local store unreadable, treating as empty");
                Vec::new()
            }
        }
    }
}
