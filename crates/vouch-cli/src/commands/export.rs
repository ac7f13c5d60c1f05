//! Export command implementation.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use tracing::info;

use crate::cli::ExportArgs;
use crate::commands::Status;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline;

/// Execute the export command.
pub fn execute_export(args: ExportArgs, config: &Config, formatter: &Formatter) -> Result<Status> {
    let outcome = pipeline::run(config, &args.stages)?;
    let document = outcome.document(config);

    match &args.out {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            document.write_json(&mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), "Wrote export");
            eprintln!(
                "{}",
                formatter.success(&format!(
                    "Exported {} claim(s) to {}",
                    document.total_theorems,
                    path.display()
                ))
            );
        }
        None => document.write_json(io::stdout().lock())?,
    }

    Ok(Status::from_pass(document.all_pass))
}
