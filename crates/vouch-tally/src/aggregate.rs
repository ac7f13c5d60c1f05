//! Ledger aggregation
//!
//! Per-tier statistics, status tag counts, sector verdicts, the imported-fact
//! catalog, gap classification and structural reason codes, all recomputed
//! from the ledger on every call.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use vouch_domain::{ClaimId, ClaimRecord, Ledger, StatusTag};

use crate::{GapRegistry, ReasonRegistry, TallyConfig};

/// Tier used for records without an integer `tier`
pub const UNASSIGNED_TIER: i64 = -1;

/// Status key used for records without a string `epistemic`
pub const UNKNOWN_STATUS: &str = "?";

/// Statistics for one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierStats {
    /// Display name
    pub name: String,

    /// Number of claims in the tier
    pub total: usize,

    /// Number of claims that passed
    pub passed: usize,

    /// Member ids in ledger order
    pub members: Vec<ClaimId>,
}

impl TierStats {
    /// Whether every member passed
    pub fn all_pass(&self) -> bool {
        self.passed == self.total
    }
}

/// An external fact cited by one or more claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedFact {
    /// Description from the first citing claim
    pub details: String,

    /// Citing claims in ledger order
    pub used_by: Vec<ClaimId>,
}

/// Gap class assignment for a whole ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GapClassification {
    /// Class of each claim, in ledger order
    pub by_claim: IndexMap<ClaimId, String>,

    /// Members of each class, classes in registry order
    pub by_class: IndexMap<String, Vec<ClaimId>>,
}

impl GapClassification {
    /// Classify every claim of a ledger
    pub fn classify(ledger: &Ledger, registry: &GapRegistry) -> Self {
        let mut by_class: IndexMap<String, Vec<ClaimId>> = registry
            .class_names()
            .into_iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        let mut by_claim = IndexMap::with_capacity(ledger.len());

        for id in ledger.ids() {
            let class = registry.classify(id.as_str());
            by_class.entry(class.to_string()).or_default().push(id.clone());
            by_claim.insert(id.clone(), class.to_string());
        }

        Self { by_claim, by_class }
    }

    /// Class of a claim
    pub fn class_of(&self, id: &str) -> Option<&str> {
        self.by_claim.get(id).map(String::as_str)
    }
}

/// Everything the Tally derives from a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    /// Number of claims
    pub total: usize,

    /// Number of claims whose `passed` is `true`
    pub passed: usize,

    /// Whether every claim passed
    pub all_pass: bool,

    /// Non-empty tiers, ascending
    pub tiers: BTreeMap<i64, TierStats>,

    /// Occurrences of each status tag
    pub status_counts: BTreeMap<String, usize>,

    /// Sector verdicts in configured order
    pub sectors: IndexMap<String, bool>,

    /// Imported-fact catalog in first-seen order
    pub imports: IndexMap<String, ImportedFact>,

    /// Gap classification, when a registry is configured
    pub gaps: Option<GapClassification>,

    /// Reason code of each `P_structural` claim in ledger order, when a
    /// reason registry is configured
    pub structural_reasons: Option<IndexMap<ClaimId, String>>,
}

impl AggregateReport {
    /// Number of claims that did not pass
    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    /// Whether every sector verdict holds
    pub fn sectors_pass(&self) -> bool {
        self.sectors.values().all(|verdict| *verdict)
    }
}

/// AND of `passed` over the listed claims present in the ledger
///
/// Absent ids are skipped, so an empty or fully absent subset is vacuously
/// true. Only a genuine boolean `true` counts as passing.
pub fn sector_verdict<S: AsRef<str>>(ledger: &Ledger, claims: &[S]) -> bool {
    claims
        .iter()
        .filter_map(|id| ledger.get(id.as_ref()))
        .all(ClaimRecord::is_passed)
}

fn structural_reasons(ledger: &Ledger, registry: &ReasonRegistry) -> IndexMap<ClaimId, String> {
    ledger
        .records()
        .filter(|record| record.status() == Some(StatusTag::PStructural))
        .map(|record| {
            let reason = registry.reason_for(record.id().as_str());
            (record.id().clone(), reason.to_string())
        })
        .collect()
}

fn fact_details(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(entry) => match entry.get("statement") {
            Some(Value::String(statement)) => statement.clone(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}

/// The Tally computes aggregate statistics over a validated ledger
///
/// Like the Gatekeeper it holds only configuration; every call works from
/// the ledger alone.
///
/// # Examples
///
/// ```
/// use vouch_domain::{Claim, Ledger, StatusTag};
/// use vouch_tally::{Sector, Tally, TallyConfig};
///
/// let ledger: Ledger = vec![
///     Claim::new("one", 0, true, StatusTag::P).into_record("T1"),
///     Claim::new("two", 1, false, StatusTag::C).into_record("T2"),
/// ]
/// .into_iter()
/// .collect();
///
/// let tally = Tally::new(
///     TallyConfig::default()
///         .with_sector(Sector::new("base", ["T1"]))
///         .with_sector(Sector::new("all", ["T1", "T2"])),
/// );
/// let report = tally.aggregate(&ledger);
/// assert_eq!(report.passed, 1);
/// assert!(!report.all_pass);
/// assert!(report.sectors["base"]);
/// assert!(!report.sectors["all"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tally {
    config: TallyConfig,
}

impl Tally {
    /// Create a Tally with the given configuration
    pub fn new(config: TallyConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    /// Aggregate a ledger
    pub fn aggregate(&self, ledger: &Ledger) -> AggregateReport {
        let mut tiers: BTreeMap<i64, TierStats> = BTreeMap::new();
        let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut imports: IndexMap<String, ImportedFact> = IndexMap::new();
        let mut passed = 0;

        for record in ledger.records() {
            let is_passed = record.is_passed();
            if is_passed {
                passed += 1;
            }

            let tier = record.tier().unwrap_or(UNASSIGNED_TIER);
            let stats = tiers.entry(tier).or_insert_with(|| TierStats {
                name: self.config.tier_name(tier),
                total: 0,
                passed: 0,
                members: Vec::new(),
            });
            stats.total += 1;
            if is_passed {
                stats.passed += 1;
            }
            stats.members.push(record.id().clone());

            let status = record.epistemic().unwrap_or(UNKNOWN_STATUS);
            *status_counts.entry(status.to_string()).or_insert(0) += 1;

            if let Some(facts) = record.imported_theorems() {
                for (fact, value) in facts {
                    imports
                        .entry(fact.clone())
                        .or_insert_with(|| ImportedFact {
                            details: fact_details(value),
                            used_by: Vec::new(),
                        })
                        .used_by
                        .push(record.id().clone());
                }
            }
        }

        let sectors: IndexMap<String, bool> = self
            .config
            .sectors
            .iter()
            .map(|sector| (sector.name.clone(), sector_verdict(ledger, &sector.claims)))
            .collect();

        let gaps = self
            .config
            .gaps
            .as_ref()
            .map(|registry| GapClassification::classify(ledger, registry));

        let structural = self
            .config
            .structural_reasons
            .as_ref()
            .map(|registry| structural_reasons(ledger, registry));

        let total = ledger.len();
        debug!(
            tiers = tiers.len(),
            statuses = status_counts.len(),
            imports = imports.len(),
            "Aggregated ledger"
        );
        info!(
            total,
            passed,
            sectors_failed = sectors.values().filter(|verdict| !**verdict).count(),
            "Tally complete"
        );

        AggregateReport {
            total,
            passed,
            all_pass: passed == total,
            tiers,
            status_counts,
            sectors,
            imports,
            gaps,
            structural_reasons: structural,
        }
    }
}
