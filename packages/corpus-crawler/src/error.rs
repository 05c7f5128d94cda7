//! Typed errors for the crawl library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Every sub-operation
//! of a tick surfaces its failure as a value; the orchestrator decides what
//! to do with it. No error here ever aborts a crawl in progress.

use thiserror::Error;

/// Errors from content source queries (revision lookup, rendered content,
/// outbound links).
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response decoded but did not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// `extract` was called on a frontier holding no entries.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("extract from an empty frontier")]
pub struct EmptyFrontierError;

/// Errors while appending corpus records to the output.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Write or flush failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be serialized
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
