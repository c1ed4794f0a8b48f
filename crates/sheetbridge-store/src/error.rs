//! Error types for the remote store.

use thiserror::Error;

/// Failures talking to, or reported by, the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Store returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Invalid range address: {0}")]
    InvalidAddress(String),
}

impl StoreError {
    pub(crate) fn not_found() -> Self {
        StoreError::Api {
            status: 404,
            message: "Requested entity was not found.".into(),
        }
    }

    pub(crate) fn bad_request<S: Into<String>>(message: S) -> Self {
        StoreError::Api {
            status: 400,
            message: message.into(),
        }
    }

    /// HTTP status reported by the store, if the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Api { status, .. } => Some(*status),
            StoreError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
