//! Error types for report operations

use thiserror::Error;

/// Errors that can occur while writing or reading an exported document
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the document failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
