//! Vouch CLI library.
//!
//! This library provides the core functionality for the Vouch command-line
//! interface, including configuration management, the validation pipeline,
//! command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use commands::Status;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
