//! Error types for the paraphrase stage.

use thiserror::Error;

/// Result type for paraphrase operations.
pub type Result<T> = std::result::Result<T, RewriteError>;

/// Errors from rewrite generation and record handling.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, empty or unexpected response)
    #[error("parse error: {0}")]
    Parse(String),

    /// Record file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
