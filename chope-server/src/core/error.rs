//! Server-level error type

use thiserror::Error;

/// Errors raised while bootstrapping or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Result type for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
