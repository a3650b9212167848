//! Error types for the Julep client.

use thiserror::Error;

/// Result type for Julep client operations.
pub type Result<T> = std::result::Result<T, JulepError>;

/// Julep client errors.
#[derive(Debug, Error)]
pub enum JulepError {
    /// Transport-level failure (connection refused, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the Julep API
    #[error("Julep API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded as an execution
    #[error("Parse error: {0}")]
    Parse(String),
}
