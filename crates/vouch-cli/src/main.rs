//! Vouch CLI - Validate a claim ledger and report on it.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vouch_cli::cli::{ConfigAction, ConfigArgs};
use vouch_cli::commands;
use vouch_cli::{Cli, Command, Config, Formatter, Status};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(Status::Pass) => ExitCode::SUCCESS,
        Ok(Status::Fail) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<Status> {
    let explicit = cli.config.as_deref();

    // `config init` must work before any file exists
    let config = match &cli.command {
        Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => Config::default(),
        _ => Config::load(explicit).context("Failed to load configuration")?,
    };

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let status = match cli.command {
        Command::Check(args) => {
            commands::execute_check(args, &config, &formatter).context("Check failed")?
        }
        Command::Export(args) => {
            commands::execute_export(args, &config, &formatter).context("Export failed")?
        }
        Command::AuditGaps(args) => {
            commands::execute_audit(args, &config, &formatter).context("Gap audit failed")?
        }
        Command::Config(args) => commands::execute_config(args, explicit, &config, &formatter)
            .context("Config command failed")?,
    };
    Ok(status)
}
