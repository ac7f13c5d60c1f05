//! Config command implementation.

use std::path::{Path, PathBuf};

use crate::cli::{ConfigAction, ConfigArgs};
use crate::commands::Status;
use crate::config::{Config, LOCAL_CONFIG};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    explicit: Option<&Path>,
    config: &Config,
    formatter: &Formatter,
) -> Result<Status> {
    match args.action {
        ConfigAction::Init { force } => {
            let path = explicit
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG));
            init_config(&path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
        ConfigAction::Show => {
            if let Some(source) = &config.source {
                println!("{}", formatter.info(&format!("Loaded from {}", source.display())));
            }
            println!("{}", formatter.format_config(config)?);
        }
    }
    Ok(Status::Pass)
}

/// Write a default configuration file.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    Config::default().save_to(path)
}
