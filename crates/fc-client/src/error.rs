use reqwest::StatusCode;
use thiserror::Error;

use crate::retry::RetryPolicy;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, TLS, timeout or body-read failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-2xx status
    #[error("HTTP error! status: {}, message: {body}", .status.as_u16())]
    Http { status: StatusCode, body: String },
    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status, when the service produced one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Whether sending the same request again could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status, .. } => RetryPolicy::is_retryable_status(*status),
            Self::Decode { .. } | Self::Encode(_) | Self::InvalidUrl(_) => false,
        }
    }
}
