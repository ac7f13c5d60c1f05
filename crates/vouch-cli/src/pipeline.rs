//! Load, validate, aggregate and export in one pass.

use std::path::PathBuf;

use vouch_gatekeeper::{Gatekeeper, ValidationReport};
use vouch_intake::{assemble, Assembly};
use vouch_report::{ExportDocument, Exporter};
use vouch_tally::{AggregateReport, Tally};

use crate::config::Config;
use crate::error::Result;

/// Everything derived from one run over the ledger.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Assembled ledger and per-stage results
    pub assembly: Assembly,
    /// Gatekeeper result
    pub validation: ValidationReport,
    /// Tally result
    pub aggregate: AggregateReport,
}

impl Outcome {
    /// Build the exported document.
    pub fn document(&self, config: &Config) -> ExportDocument {
        Exporter::new(config.ledger.clone())
            .with_issue_limit(config.validation.issue_limit)
            .export(&self.assembly.ledger, &self.validation, &self.aggregate)
    }

    /// Whether the run passes: every claim passed, and under `strict` the
    /// ledger also validated cleanly.
    pub fn passes(&self, strict: bool) -> bool {
        self.aggregate.all_pass && (!strict || self.validation.valid)
    }
}

/// Assemble the ledger and run validation and aggregation.
pub fn run(config: &Config, overrides: &[PathBuf]) -> Result<Outcome> {
    let stages = config.resolved_stages(overrides);
    let assembly = assemble(&stages)?;

    let gatekeeper = Gatekeeper::new(config.validation.clone(), config.vocabulary.clone());
    let validation = gatekeeper.validate(&assembly.ledger);

    let tally = Tally::new(config.tally.clone());
    let aggregate = tally.aggregate(&assembly.ledger);

    Ok(Outcome {
        assembly,
        validation,
        aggregate,
    })
}
