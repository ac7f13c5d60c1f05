//! Reason codes for structurally derived claims
//!
//! A `P_structural` claim holds only modulo something outside the axioms.
//! The registry records what that something is: the first declared code
//! listing the claim, or the registry's default code.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::TallyError;

fn default_reason() -> String {
    "other".to_string()
}

/// One reason code and the claims it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonCode {
    /// Code name, e.g. `qft_import` or `regime_dependent`
    pub name: String,

    /// Claim ids carrying the code
    #[serde(default)]
    pub claims: Vec<String>,
}

impl ReasonCode {
    /// Create a code
    pub fn new<I, S>(name: impl Into<String>, claims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            claims: claims.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configured mapping from structural claims to reason codes
///
/// # Examples
///
/// ```
/// use vouch_tally::{ReasonCode, ReasonRegistry};
///
/// let reasons = ReasonRegistry::default().with_code(ReasonCode::new("qft_import", ["T6"]));
/// assert_eq!(reasons.reason_for("T6"), "qft_import");
/// assert_eq!(reasons.reason_for("T9"), "other");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonRegistry {
    /// Code for structural claims listed nowhere
    #[serde(default = "default_reason")]
    pub default_reason: String,

    /// Declared codes, in precedence order
    #[serde(default)]
    pub codes: Vec<ReasonCode>,
}

impl Default for ReasonRegistry {
    fn default() -> Self {
        Self {
            default_reason: default_reason(),
            codes: Vec::new(),
        }
    }
}

impl ReasonRegistry {
    /// Add a code after the existing ones
    pub fn with_code(mut self, code: ReasonCode) -> Self {
        self.codes.push(code);
        self
    }

    /// Reason code of a structural claim
    pub fn reason_for(&self, id: &str) -> &str {
        self.codes
            .iter()
            .find(|code| code.claims.iter().any(|claim| claim == id))
            .map(|code| code.name.as_str())
            .unwrap_or(self.default_reason.as_str())
    }

    /// Validate the registry
    pub fn validate(&self) -> Result<(), TallyError> {
        if self.default_reason.trim().is_empty() {
            return Err(TallyError::Config(
                "default reason code must not be empty".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for code in &self.codes {
            if code.name.trim().is_empty() {
                return Err(TallyError::Config("reason code name must not be empty".to_string()));
            }
            if !seen.insert(code.name.as_str()) {
                return Err(TallyError::DuplicateReason(code.name.clone()));
            }
        }
        Ok(())
    }
}
