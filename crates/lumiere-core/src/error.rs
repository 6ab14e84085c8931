//! Core error types for lumiere-core

use lumiere_client::ClientError;
use thiserror::Error;

use crate::forms::ValidationError;

/// Errors that can occur in core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Backend or transport failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Form input rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration file could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Cookie jar or config file could not be read/written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cookie jar contents are not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Quiz answered out of range
    #[error("quiz error: {0}")]
    Quiz(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
