//! Error types for the AgentChat client

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Client Result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client Error type
#[derive(Error, Debug)]
pub enum ClientError {
    /// A channel or message operation was attempted before an identity was loaded.
    #[error("Not registered: load or register an identity first")]
    NotRegistered,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with `success: false` or a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: StatusCode,
        message: String,
        hint: Option<String>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// Base URL or path segment that cannot form a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The credentials file exists but could not be parsed.
    #[error("Credentials file {path:?} is corrupt: {source}")]
    CorruptCredentials {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Signing failed: {0}")]
    Signing(String),
}

impl ClientError {
    /// Server-supplied hint, if the API attached one.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Api { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// True for network level faults (timeout, DNS, connection refused).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
