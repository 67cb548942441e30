//! Error types for the demo API client.

use thiserror::Error;

/// Errors that can occur when talking to the demo backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not reach the backend.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Transport-level failure other than connect/timeout.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The backend answered with a non-2xx status.
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// Failed to parse response.
    #[error("Failed to parse response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    /// The backend answered `success: false`.
    #[error("{endpoint} reported failure: {}", .reason.as_deref().unwrap_or("success=false"))]
    Unsuccessful {
        endpoint: String,
        reason: Option<String>,
    },

    /// The client could not be constructed.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// Coarse classification used when turning errors into user messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never got an answer.
    Network,
    /// The backend answered, but not with a usable success.
    Api,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Connection(_)
            | ClientError::Timeout
            | ClientError::Http(_)
            | ClientError::Config(_) => ErrorKind::Network,
            ClientError::Status { .. }
            | ClientError::Parse { .. }
            | ClientError::Unsuccessful { .. } => ErrorKind::Api,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}
