//! The exported document
//!
//! Field names and nesting are a contract with downstream tooling; rename
//! nothing here without versioning the format.

use std::collections::BTreeMap;
use std::io::Write;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ReportError;

/// Descriptive metadata copied into the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportMeta {
    /// Ledger title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Ledger version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Ledger date, free-form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Validation summary section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCheck {
    /// Whether validation found no issue
    pub valid: bool,

    /// Number of cycles found
    pub cycles: usize,

    /// Leading issues, truncated to the configured limit
    pub issues: Vec<String>,
}

/// Per-tier section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierEntry {
    /// Tier display name
    pub name: String,

    /// Claims that passed
    pub passed: usize,

    /// Claims in the tier
    pub total: usize,

    /// Member ids in ledger order
    pub theorems: Vec<String>,
}

/// Imported-fact catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntry {
    /// Citing claims
    pub used_by: Vec<String>,

    /// Description of the fact
    pub details: String,
}

/// Per-claim projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheoremEntry {
    /// Claim name
    pub name: String,

    /// Tier, `-1` when the record has none
    pub tier: i64,

    /// Outcome; only a boolean `true` in the record exports as `true`
    pub passed: bool,

    /// Status tag as written
    pub epistemic: String,

    /// Key result text
    pub key_result: String,

    /// Gap class, when gap classification is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_type: Option<String>,

    /// Dependency references as written
    pub dependencies: Vec<String>,

    /// Names of imported facts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imported_theorems: Vec<String>,

    /// Reason code, for `P_structural` claims when reason codes are configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ps_reason: Option<String>,
}

/// Machine-readable summary of a validated, aggregated ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Ledger title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Ledger version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Ledger date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Number of claims
    pub total_theorems: usize,

    /// Number of passing claims
    pub passed: usize,

    /// Whether every claim passed
    pub all_pass: bool,

    /// Occurrences of each status tag
    pub epistemic_counts: BTreeMap<String, usize>,

    /// Sector verdicts in configured order
    pub sector_verdicts: IndexMap<String, bool>,

    /// Validation summary
    pub dependency_check: DependencyCheck,

    /// Tier statistics keyed by tier number, ascending
    pub tier_stats: IndexMap<String, TierEntry>,

    /// Imported-fact catalog
    pub math_imports: IndexMap<String, ImportEntry>,

    /// Reason code of each `P_structural` claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_structural_reasons: Option<IndexMap<String, String>>,

    /// Per-claim projections in ledger order
    pub theorems: IndexMap<String, TheoremEntry>,
}

impl ExportDocument {
    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON followed by a newline
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Parse a previously exported document
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of failing claims
    pub fn failed(&self) -> usize {
        self.total_theorems - self.passed
    }
}
