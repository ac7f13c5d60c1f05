//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation configuration rejected
    #[error("Validation settings: {0}")]
    Gatekeeper(#[from] vouch_gatekeeper::GatekeeperError),

    /// Tally configuration rejected
    #[error("Tally settings: {0}")]
    Tally(#[from] vouch_tally::TallyError),

    /// Stage loading failed
    #[error("Intake error: {0}")]
    Intake(#[from] vouch_intake::IntakeError),

    /// Report writing failed
    #[error("Report error: {0}")]
    Report(#[from] vouch_report::ReportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML writing error
    #[error("TOML writing error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
