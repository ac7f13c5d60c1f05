//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur during gatekeeper operations
///
/// Validation itself never fails: ledger problems are reported as issues.
/// These errors cover misconfiguration only.
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
