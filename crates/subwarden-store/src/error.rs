use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("local store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("local store write task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Other(String),
}
