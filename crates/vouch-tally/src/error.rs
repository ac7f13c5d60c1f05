//! Error types for Tally operations

use thiserror::Error;

/// Errors that can occur while configuring the Tally
///
/// Aggregation itself never fails; only a malformed configuration is
/// rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TallyError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two sectors share a name
    #[error("Duplicate sector: {0}")]
    DuplicateSector(String),

    /// Two gap classes share a name
    #[error("Duplicate gap class: {0}")]
    DuplicateGapClass(String),

    /// Two structural reason codes share a name
    #[error("Duplicate reason code: {0}")]
    DuplicateReason(String),
}
