//! Error types for calbridge tools.

use thiserror::Error;

/// Errors raised while decoding or encoding tool traffic.
#[derive(Error, Debug)]
pub enum CalBridgeError {
    #[error("Invalid tool invocation: {0}")]
    InvalidInvocation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for calbridge operations.
pub type CalBridgeResult<T> = Result<T, CalBridgeError>;
