//! Ledger validation logic

use std::fmt;

use tracing::{debug, info};
use vouch_domain::{cites_axiom, normalize_reference, ClaimId, Ledger, Vocabulary};

use crate::cycles::{detect_cycles, Cycle};
use crate::graph::DependencyGraph;
use crate::schema::{validate_schema, SchemaViolation};
use crate::{ReferencePolicy, ValidationConfig};

/// A problem found while validating a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// A record failed a structural check
    Schema {
        /// Offending record
        claim: ClaimId,
        /// What is wrong with it
        violation: SchemaViolation,
    },

    /// A dependency reference resolves to nothing known
    UnresolvedDependency {
        /// Record declaring the reference
        claim: ClaimId,
        /// The reference as written
        reference: String,
    },

    /// One or more circular dependency chains
    CircularDependencies(Vec<Cycle>),
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::Schema { claim, violation } => {
                write!(f, "{} schema error: {}", claim, violation)
            }
            Issue::UnresolvedDependency { claim, reference } => {
                write!(f, "{} depends on '{}' -- not in registry", claim, reference)
            }
            Issue::CircularDependencies(cycles) => {
                f.write_str("circular dependencies: ")?;
                for (idx, cycle) in cycles.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", cycle)?;
                }
                Ok(())
            }
        }
    }
}

/// Outcome of validating a ledger
///
/// `valid` and the cycle count are independent signals: a ledger can be
/// schema-clean yet cyclic, or acyclic yet malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// True iff no issue was found
    pub valid: bool,

    /// Issues in discovery order: per-record issues in ledger order, then
    /// the cycle summary
    pub issues: Vec<Issue>,

    /// Number of records checked
    pub total_checked: usize,

    /// Every cycle found
    pub cycles: Vec<Cycle>,
}

impl ValidationReport {
    /// Number of cycles found
    pub fn cycles_found(&self) -> usize {
        self.cycles.len()
    }

    /// Issues rendered as strings
    pub fn issue_messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// Number of schema issues
    pub fn schema_issue_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, Issue::Schema { .. }))
            .count()
    }

    /// Number of unresolved dependency issues
    pub fn unresolved_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| matches!(issue, Issue::UnresolvedDependency { .. }))
            .count()
    }
}

/// The Gatekeeper validates a ledger before any summary of it is trusted
///
/// Stateless apart from its configuration: every call rebuilds the graph
/// from scratch, so one gatekeeper can serve many ledgers, including from
/// several threads at once.
///
/// # Examples
///
/// ```
/// use vouch_domain::{Claim, Ledger, StatusTag, Vocabulary};
/// use vouch_gatekeeper::{Gatekeeper, ValidationConfig};
///
/// let ledger: Ledger = vec![
///     Claim::new("base", 0, true, StatusTag::P)
///         .with_dependencies(["A1"])
///         .into_record("T1"),
///     Claim::new("step", 1, true, StatusTag::P)
///         .with_dependencies(["T1"])
///         .into_record("T2"),
/// ]
/// .into_iter()
/// .collect();
///
/// let gatekeeper = Gatekeeper::new(
///     ValidationConfig::default(),
///     Vocabulary::new(["A1"], Vec::<String>::new()),
/// );
/// let report = gatekeeper.validate(&ledger);
/// assert!(report.valid);
/// assert_eq!(report.cycles_found(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
    vocabulary: Vocabulary,
}

impl Gatekeeper {
    /// Create a Gatekeeper with the given configuration and vocabulary
    pub fn new(config: ValidationConfig, vocabulary: Vocabulary) -> Self {
        Self { config, vocabulary }
    }

    /// Create a Gatekeeper with default configuration
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self::new(ValidationConfig::default(), vocabulary)
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Active vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Validate every record, every reference, and the dependency graph
    ///
    /// Never fails and never stops early: all issues are collected so the
    /// whole ledger is diagnosed in one pass.
    pub fn validate(&self, ledger: &Ledger) -> ValidationReport {
        let mut issues = Vec::new();

        for record in ledger.records() {
            if self.config.validate_schema {
                for violation in validate_schema(record) {
                    issues.push(Issue::Schema {
                        claim: record.id().clone(),
                        violation,
                    });
                }
            }

            if self.config.validate_references {
                for reference in record.dependencies() {
                    if !self.resolves(reference, ledger) {
                        issues.push(Issue::UnresolvedDependency {
                            claim: record.id().clone(),
                            reference: reference.to_string(),
                        });
                    }
                }
            }
        }

        let cycles = if self.config.detect_cycles {
            let graph = DependencyGraph::build(ledger, &self.vocabulary);
            debug!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "Built dependency graph"
            );
            detect_cycles(&graph)
        } else {
            Vec::new()
        };

        if !cycles.is_empty() {
            debug!("Found {} dependency cycle(s)", cycles.len());
            issues.push(Issue::CircularDependencies(cycles.clone()));
        }

        let report = ValidationReport {
            valid: issues.is_empty(),
            issues,
            total_checked: ledger.len(),
            cycles,
        };

        info!(
            checked = report.total_checked,
            issues = report.issues.len(),
            cycles = report.cycles_found(),
            valid = report.valid,
            "Ledger validated"
        );

        report
    }

    /// Whether a dependency reference resolves against the ledger and vocabulary
    ///
    /// A reference resolves when it, or its parenthetical-stripped form, is
    /// a claim id, an axiom or a known external. Axiom citations beyond that
    /// depend on the configured [`ReferencePolicy`].
    pub fn resolves(&self, reference: &str, ledger: &Ledger) -> bool {
        let known = |candidate: &str| ledger.contains(candidate) || self.vocabulary.is_sink(candidate);

        if known(reference) || known(normalize_reference(reference)) {
            return true;
        }

        let mut axioms = self.vocabulary.axioms.iter().filter(|axiom| !axiom.is_empty());
        match self.config.reference_policy {
            ReferencePolicy::Exact => false,
            ReferencePolicy::Annotated => axioms.any(|axiom| cites_axiom(reference, axiom)),
            ReferencePolicy::LegacyPrefix => axioms.any(|axiom| reference.starts_with(axiom.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vouch_domain::{Claim, ClaimRecord, StatusTag};

    fn claim(id: &str, deps: &[&str]) -> ClaimRecord {
        Claim::new(format!("{}: claim", id), 0, true, StatusTag::P)
            .with_summary("summary")
            .with_key_result("result")
            .with_dependencies(deps.iter().copied())
            .into_record(id)
    }

    fn ledger(records: Vec<ClaimRecord>) -> Ledger {
        records.into_iter().collect()
    }

    fn vocab() -> Vocabulary {
        Vocabulary::new(["A1", "A2", "A3", "A4", "A5"], ["Regime assumption", "T8 (d=4)"])
    }

    #[test]
    fn test_valid_ledger() {
        let gatekeeper = Gatekeeper::with_vocabulary(vocab());
        let report = gatekeeper.validate(&ledger(vec![claim("A", &[]), claim("B", &["A"])]));

        assert!(report.valid);
        assert!(report.issues.is_empty());
        assert_eq!(report.total_checked, 2);
        assert_eq!(report.cycles_found(), 0);
    }

    #[test]
    fn test_mutual_cycle_reported_once() {
        let gatekeeper = Gatekeeper::with_vocabulary(vocab());
        let report = gatekeeper.validate(&ledger(vec![claim("A", &["B"]), claim("B", &["A"])]));

        assert!(!report.valid);
        assert_eq!(report.cycles_found(), 1);
        assert_eq!(
            report.issue_messages(),
            vec!["circular dependencies: A -> B -> A".to_string()]
        );
    }

    #[test]
    fn test_unknown_reference() {
        let gatekeeper = Gatekeeper::with_vocabulary(vocab());
        let report = gatekeeper.validate(&ledger(vec![claim("A", &["UNKNOWN_REF"])]));

        assert!(!report.valid);
        assert_eq!(report.issues.len(), 1);
        let message = report.issues[0].to_string();
        assert!(message.contains('A'));
        assert!(message.contains("UNKNOWN_REF"));
        assert_eq!(report.unresolved_count(), 1);
        assert_eq!(report.cycles_found(), 0);
    }

    #[test]
    fn test_schema_issues_prefixed_with_claim() {
        let bad = ClaimRecord::from_value(
            "T_bad",
            json!({"name": "x", "passed": "yes", "dependencies": []}),
        )
        .unwrap();
        let report = Gatekeeper::with_vocabulary(vocab()).validate(&ledger(vec![bad]));

        assert!(!report.valid);
        assert_eq!(report.schema_issue_count(), 2);
        for message in report.issue_messages() {
            assert!(message.starts_with("T_bad schema error: "));
        }
    }

    #[test]
    fn test_schema_clean_but_cyclic_and_vice_versa() {
        let gatekeeper = Gatekeeper::with_vocabulary(vocab());

        let cyclic = gatekeeper.validate(&ledger(vec![claim("A", &["A"])]));
        assert_eq!(cyclic.schema_issue_count(), 0);
        assert_eq!(cyclic.cycles_found(), 1);

        let malformed = ClaimRecord::from_value("M", json!({"dependencies": []})).unwrap();
        let acyclic = gatekeeper.validate(&ledger(vec![malformed]));
        assert!(!acyclic.valid);
        assert_eq!(acyclic.cycles_found(), 0);
    }

    #[test]
    fn test_externals_and_annotations_resolve() {
        let gatekeeper = Gatekeeper::with_vocabulary(vocab());
        let report = gatekeeper.validate(&ledger(vec![
            claim("T8", &[]),
            claim("T9", &["T8 (d=4)", "Regime assumption", "A1 (finite capacity)", "A4: order"]),
        ]));
        assert!(report.valid, "issues: {:?}", report.issue_messages());
    }

    #[test]
    fn test_reference_policies() {
        let ledger = ledger(vec![claim("T1", &[])]);

        let annotated = Gatekeeper::new(ValidationConfig::default(), vocab());
        assert!(annotated.resolves("A1 (finite capacity)", &ledger));
        assert!(annotated.resolves("A1", &ledger));
        assert!(!annotated.resolves("A10_unrelated", &ledger));

        let strict = Gatekeeper::new(ValidationConfig::strict(), vocab());
        assert!(strict.resolves("A1 (finite capacity)", &ledger));
        assert!(strict.resolves("T1 (note)", &ledger));
        assert!(!strict.resolves("A4: order", &ledger));

        let legacy = Gatekeeper::new(ValidationConfig::permissive(), vocab());
        assert!(legacy.resolves("A10_unrelated", &ledger));
        assert!(legacy.resolves("A4: order", &ledger));
        assert!(!legacy.resolves("B1", &ledger));
    }

    #[test]
    fn test_empty_reference_never_resolves() {
        let gatekeeper = Gatekeeper::with_vocabulary(vocab());
        let ledger = ledger(vec![claim("T1", &[])]);
        assert!(!gatekeeper.resolves("", &ledger));
        assert!(!gatekeeper.resolves("(annotation only)", &ledger));
    }

    #[test]
    fn test_disabled_checks() {
        let config = ValidationConfig {
            validate_references: false,
            detect_cycles: false,
            ..ValidationConfig::default()
        };
        let gatekeeper = Gatekeeper::new(config, vocab());
        let report = gatekeeper.validate(&ledger(vec![claim("A", &["B", "nowhere"]), claim("B", &["A"])]));
        assert!(report.valid);
        assert_eq!(report.cycles_found(), 0);
    }

    #[test]
    fn test_empty_ledger_is_valid() {
        let report = Gatekeeper::default().validate(&Ledger::new());
        assert!(report.valid);
        assert_eq!(report.total_checked, 0);
    }
}
