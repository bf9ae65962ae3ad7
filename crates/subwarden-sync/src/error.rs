use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("record store is not configured")]
    NotConfigured,
    #[error("invalid record store configuration: {0}")]
    InvalidConfig(String),
    #[error("record store did not answer within {0:?}")]
    Timeout(Duration),
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("record store returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed record store response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// HTTP status, when the store answered with a non-success code.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(err)
        }
    }
}
