//! Projection of validated, aggregated state into an [`ExportDocument`]

use indexmap::IndexMap;
use tracing::debug;
use vouch_domain::{ClaimId, ClaimRecord, Ledger};
use vouch_gatekeeper::ValidationReport;
use vouch_tally::{AggregateReport, UNASSIGNED_TIER, UNKNOWN_STATUS};

use crate::document::{
    DependencyCheck, ExportDocument, ImportEntry, ReportMeta, TheoremEntry, TierEntry,
};

/// Number of issues kept in an exported document by default
pub const DEFAULT_ISSUE_LIMIT: usize = 10;

fn ids(ids: &[ClaimId]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

fn project(record: &ClaimRecord, aggregate: &AggregateReport) -> TheoremEntry {
    let id = record.id().as_str();
    TheoremEntry {
        name: record.name().unwrap_or_default().to_string(),
        tier: record.tier().unwrap_or(UNASSIGNED_TIER),
        passed: record.is_passed(),
        epistemic: record.epistemic().unwrap_or(UNKNOWN_STATUS).to_string(),
        key_result: record.key_result().unwrap_or_default().to_string(),
        gap_type: aggregate
            .gaps
            .as_ref()
            .and_then(|gaps| gaps.class_of(id))
            .map(str::to_string),
        dependencies: record.dependencies().into_iter().map(str::to_string).collect(),
        imported_theorems: record
            .imported_theorems()
            .map(|facts| facts.keys().cloned().collect())
            .unwrap_or_default(),
        ps_reason: aggregate
            .structural_reasons
            .as_ref()
            .and_then(|reasons| reasons.get(id))
            .cloned(),
    }
}

/// Builds export documents
///
/// Pure projection and truncation: everything in the document is already
/// decided by the validation and aggregate reports.
///
/// # Examples
///
/// ```
/// use vouch_domain::{Claim, Ledger, StatusTag, Vocabulary};
/// use vouch_gatekeeper::Gatekeeper;
/// use vouch_report::{Exporter, ReportMeta};
/// use vouch_tally::Tally;
///
/// let ledger: Ledger = vec![Claim::new("base", 0, true, StatusTag::P).into_record("T1")]
///     .into_iter()
///     .collect();
/// let validation = Gatekeeper::with_vocabulary(Vocabulary::default()).validate(&ledger);
/// let aggregate = Tally::default().aggregate(&ledger);
///
/// let document = Exporter::new(ReportMeta::default()).export(&ledger, &validation, &aggregate);
/// assert_eq!(document.total_theorems, 1);
/// assert!(document.dependency_check.valid);
/// ```
#[derive(Debug, Clone)]
pub struct Exporter {
    meta: ReportMeta,
    issue_limit: usize,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ReportMeta::default())
    }
}

impl Exporter {
    /// Create an exporter with the default issue limit
    pub fn new(meta: ReportMeta) -> Self {
        Self {
            meta,
            issue_limit: DEFAULT_ISSUE_LIMIT,
        }
    }

    /// Keep at most `limit` issues in the document
    pub fn with_issue_limit(mut self, limit: usize) -> Self {
        self.issue_limit = limit;
        self
    }

    /// Project a ledger and its reports into a document
    pub fn export(
        &self,
        ledger: &Ledger,
        validation: &ValidationReport,
        aggregate: &AggregateReport,
    ) -> ExportDocument {
        let issues: Vec<String> = validation
            .issues
            .iter()
            .take(self.issue_limit)
            .map(ToString::to_string)
            .collect();
        if issues.len() < validation.issues.len() {
            debug!(
                kept = issues.len(),
                total = validation.issues.len(),
                "Truncated exported issues"
            );
        }

        let tier_stats: IndexMap<String, TierEntry> = aggregate
            .tiers
            .iter()
            .map(|(tier, stats)| {
                (
                    tier.to_string(),
                    TierEntry {
                        name: stats.name.clone(),
                        passed: stats.passed,
                        total: stats.total,
                        theorems: ids(&stats.members),
                    },
                )
            })
            .collect();

        let math_imports: IndexMap<String, ImportEntry> = aggregate
            .imports
            .iter()
            .map(|(fact, entry)| {
                (
                    fact.clone(),
                    ImportEntry {
                        used_by: ids(&entry.used_by),
                        details: entry.details.clone(),
                    },
                )
            })
            .collect();

        let theorems: IndexMap<String, TheoremEntry> = ledger
            .records()
            .map(|record| (record.id().to_string(), project(record, aggregate)))
            .collect();

        let p_structural_reasons = aggregate.structural_reasons.as_ref().map(|reasons| {
            reasons
                .iter()
                .map(|(id, reason)| (id.to_string(), reason.clone()))
                .collect()
        });

        ExportDocument {
            title: self.meta.title.clone(),
            version: self.meta.version.clone(),
            date: self.meta.date.clone(),
            total_theorems: aggregate.total,
            passed: aggregate.passed,
            all_pass: aggregate.all_pass,
            epistemic_counts: aggregate.status_counts.clone(),
            sector_verdicts: aggregate.sectors.clone(),
            dependency_check: DependencyCheck {
                valid: validation.valid,
                cycles: validation.cycles_found(),
                issues,
            },
            tier_stats,
            math_imports,
            p_structural_reasons,
            theorems,
        }
    }
}
