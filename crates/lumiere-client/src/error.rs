//! Error types for the Lumiere client

use thiserror::Error;

/// Message shown when the backend cannot be reached at all
pub const TRANSPORT_MESSAGE: &str = "Unable to reach the server. Please try again.";

/// Errors that can occur when using the Lumiere client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network failure: connection refused, DNS, TLS, broken body stream
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Reading a local file for upload failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API returned an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from server, or a generic fallback
        message: String,
    },

    /// Operation not offered by the resource (e.g. deleting an order)
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl ClientError {
    /// HTTP status of a backend rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for a notification
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Transport(_) => TRANSPORT_MESSAGE.to_string(),
            Self::Json(_) => "The server sent an unexpected response.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
