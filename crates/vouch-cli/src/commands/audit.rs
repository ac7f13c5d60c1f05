//! Audit-gaps command implementation.

use crate::cli::AuditArgs;
use crate::commands::Status;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline;

/// Execute the audit-gaps command.
///
/// The audit is informational and always passes.
pub fn execute_audit(args: AuditArgs, config: &Config, formatter: &Formatter) -> Result<Status> {
    let outcome = pipeline::run(config, &args.stages)?;
    println!("{}", formatter.format_audit(&outcome, config)?);
    Ok(Status::Pass)
}
