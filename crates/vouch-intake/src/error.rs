//! Error types for intake

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing or assembling stages
#[derive(Error, Debug)]
pub enum IntakeError {
    /// A stage file could not be read
    #[error("Failed to read stage '{stage}' from {}: {source}", path.display())]
    Read {
        /// Stage name
        stage: String,
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A stage document is not valid JSON
    #[error("JSON parse error in stage '{stage}': {source}")]
    JsonParse {
        /// Stage name
        stage: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A stage document parsed but does not have the stage shape
    #[error("Invalid stage format in '{stage}': {reason}")]
    InvalidFormat {
        /// Stage name
        stage: String,
        /// What is wrong
        reason: String,
    },

    /// A required stage failed to produce records
    #[error("Required stage '{stage}' failed: {reason}")]
    RequiredStage {
        /// Stage name
        stage: String,
        /// Producer failure, rendered
        reason: String,
    },
}
