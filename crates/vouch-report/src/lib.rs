//! Vouch Report
//!
//! Exports a validated, aggregated ledger as a structured document for
//! machine consumption.
//!
//! The document is a plain serde type ([`ExportDocument`]) whose field names
//! form the exchange format: `total_theorems`, `passed`, `all_pass`,
//! `epistemic_counts`, `sector_verdicts`, `dependency_check`, `tier_stats`,
//! `math_imports` and `theorems`. Serializing, parsing and serializing again
//! yields the same bytes.

#![warn(missing_docs)]

mod document;
mod error;
mod export;

pub use document::{
    DependencyCheck, ExportDocument, ImportEntry, ReportMeta, TheoremEntry, TierEntry,
};
pub use error::ReportError;
pub use export::{Exporter, DEFAULT_ISSUE_LIMIT};
