//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Vouch CLI - Validate a claim ledger and report on it.
#[derive(Debug, Parser)]
#[command(name = "vouch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VOUCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the ledger and print a report
    Check(CheckArgs),

    /// Write the exported JSON document
    Export(ExportArgs),

    /// Show the gap classification of every claim
    AuditGaps(AuditArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Stage files to load instead of the configured stages
    pub stages: Vec<PathBuf>,

    /// Also fail when dependency validation finds issues
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Stage files to load instead of the configured stages
    pub stages: Vec<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the audit-gaps command.
#[derive(Debug, Parser)]
pub struct AuditArgs {
    /// Stage files to load instead of the configured stages
    pub stages: Vec<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["vouch", "check", "a.json", "b.json", "--strict"]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.stages.len(), 2);
                assert!(args.strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["vouch", "export", "--out", "r.json", "-vv", "--no-color"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        match cli.command {
            Command::Export(args) => assert_eq!(args.out, Some(PathBuf::from("r.json"))),
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_audit_gaps_command() {
        let cli = Cli::parse_from(["vouch", "--format", "json", "audit-gaps"]);
        assert!(matches!(cli.command, Command::AuditGaps(_)));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["vouch", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init"),
        }
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["vouch"]).is_err());
    }
}
