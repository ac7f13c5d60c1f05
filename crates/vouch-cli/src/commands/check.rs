//! Check command implementation.

use crate::cli::CheckArgs;
use crate::commands::Status;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline;

/// Execute the check command.
pub fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<Status> {
    let outcome = pipeline::run(config, &args.stages)?;
    println!("{}", formatter.format_check(&outcome, config)?);
    Ok(Status::from_pass(outcome.passes(args.strict)))
}
