//! Staged ledger assembly
//!
//! Sources are merged in declared order, later stages overwriting earlier
//! ones id by id. A failing optional source contributes nothing; a failing
//! required source aborts assembly.

use std::fmt;

use tracing::{info, warn};
use vouch_domain::{ClaimId, ClaimSource, Ledger};

use crate::error::IntakeError;

/// What happened to one stage during assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// The stage was merged
    Loaded {
        /// Records in the stage
        records: usize,
        /// Ids that replaced an earlier stage's record
        replaced: Vec<ClaimId>,
    },

    /// An optional stage failed and was dropped
    Skipped {
        /// Producer failure, rendered
        reason: String,
    },
}

/// Per-stage summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    /// Stage name
    pub name: String,

    /// Outcome
    pub outcome: StageOutcome,
}

/// An assembled ledger and how each stage contributed
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// The merged ledger
    pub ledger: Ledger,

    /// One entry per source, in order
    pub stages: Vec<StageReport>,
}

impl Assembly {
    /// Names of stages that were skipped
    pub fn skipped(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter(|stage| matches!(stage.outcome, StageOutcome::Skipped { .. }))
            .map(|stage| stage.name.as_str())
            .collect()
    }
}

/// Assemble a ledger from sources in order
pub fn assemble<S>(sources: &[S]) -> Result<Assembly, IntakeError>
where
    S: ClaimSource,
    S::Error: fmt::Display,
{
    let mut assembly = Assembly::default();

    for source in sources {
        let records = match source.produce() {
            Ok(records) => records,
            Err(e) if source.is_optional() => {
                warn!(stage = source.name(), error = %e, "Skipping optional stage");
                assembly.stages.push(StageReport {
                    name: source.name().to_string(),
                    outcome: StageOutcome::Skipped {
                        reason: e.to_string(),
                    },
                });
                continue;
            }
            Err(e) => {
                return Err(IntakeError::RequiredStage {
                    stage: source.name().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let count = records.len();
        let replaced = assembly.ledger.merge_stage(records);
        if !replaced.is_empty() {
            warn!(
                stage = source.name(),
                replaced = replaced.len(),
                "Stage overwrote existing claims"
            );
        }
        info!(stage = source.name(), records = count, "Loaded stage");

        assembly.stages.push(StageReport {
            name: source.name().to_string(),
            outcome: StageOutcome::Loaded {
                records: count,
                replaced,
            },
        });
    }

    info!(
        claims = assembly.ledger.len(),
        stages = assembly.stages.len(),
        "Assembled ledger"
    );
    Ok(assembly)
}
