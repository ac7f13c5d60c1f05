//! Vocabulary module - dependency targets that live outside the ledger

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Recognized non-claim dependency targets
///
/// Axioms and known externals are valid dependency targets but never claims
/// themselves. Both are sinks: they have no outgoing edges, so a dependency
/// on one can never take part in a cycle.
///
/// A vocabulary is passed explicitly to the validator, so ledgers with
/// different axiom sets can be checked side by side.
///
/// # Examples
///
/// ```
/// use vouch_domain::Vocabulary;
///
/// let vocab = Vocabulary::new(["A1", "A2"], ["Regime assumption"]);
/// assert!(vocab.is_axiom("A1"));
/// assert!(vocab.is_external("Regime assumption"));
/// assert!(!vocab.is_axiom("A3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Axiom identifiers
    #[serde(default)]
    pub axioms: BTreeSet<String>,

    /// Known external references (external theorems, regime names)
    #[serde(default)]
    pub externals: BTreeSet<String>,
}

impl Vocabulary {
    /// Create a vocabulary from axiom and external lists
    pub fn new<A, E>(axioms: A, externals: E) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            axioms: axioms.into_iter().map(Into::into).collect(),
            externals: externals.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `reference` is an axiom id (exact match)
    pub fn is_axiom(&self, reference: &str) -> bool {
        self.axioms.contains(reference)
    }

    /// Whether `reference` is a known external (exact match)
    pub fn is_external(&self, reference: &str) -> bool {
        self.externals.contains(reference)
    }

    /// Whether `reference` is any recognized sink
    pub fn is_sink(&self, reference: &str) -> bool {
        self.is_axiom(reference) || self.is_external(reference)
    }

    /// Whether both sets are empty
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty() && self.externals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_lookup() {
        let vocab = Vocabulary::new(["A1"], ["T_channels"]);
        assert!(vocab.is_sink("A1"));
        assert!(vocab.is_sink("T_channels"));
        assert!(!vocab.is_sink("T5"));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Vocabulary::default().is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let vocab = Vocabulary::new(["A1", "A2"], ["R11"]);
        let json = serde_json::to_string(&vocab).unwrap();
        let parsed: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(vocab, parsed);
    }

    #[test]
    fn test_missing_sections_default() {
        let parsed: Vocabulary = serde_json::from_str(r#"{"axioms": ["A1"]}"#).unwrap();
        assert!(parsed.is_axiom("A1"));
        assert!(parsed.externals.is_empty());
    }
}
