//! Error types for the remote transport.

use thiserror::Error;

/// Remote service operation errors
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection error (refused, DNS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The service answered with a non-success status
    #[error("Service error: {0}")]
    Api(String),

    /// The service answered with a body that does not parse
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            RemoteError::Connection(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) if status.is_client_error() => {
                    RemoteError::Api(format!("HTTP {}: {}", status, e))
                }
                Some(status) if status.is_server_error() => {
                    RemoteError::Api(format!("Server error (HTTP {})", status))
                }
                _ => RemoteError::Api(e.to_string()),
            }
        } else if e.is_decode() {
            RemoteError::InvalidResponse(e.to_string())
        } else {
            RemoteError::Connection(e.to_string())
        }
    }
}
