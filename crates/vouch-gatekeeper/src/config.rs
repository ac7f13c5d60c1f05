//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

use crate::GatekeeperError;

/// How dependency references that are not exact matches get resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Only exact or parenthetical-stripped matches resolve
    Exact,

    /// Also accept axiom citations followed by a non-identifier character
    /// (`"A1 (finite capacity)"`, `"A4: irreversibility"`)
    #[default]
    Annotated,

    /// Accept anything that literally starts with an axiom id
    /// (`"A10_unrelated"` resolves against `A1`)
    LegacyPrefix,
}

/// Configuration for ledger validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Enable record schema checks
    pub validate_schema: bool,

    /// Enable dependency resolution checks
    pub validate_references: bool,

    /// Enable circular dependency detection
    pub detect_cycles: bool,

    /// Resolution rule for non-exact references
    pub reference_policy: ReferencePolicy,

    /// Number of issues carried into exported reports
    pub issue_limit: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_schema: true,
            validate_references: true,
            detect_cycles: true,
            reference_policy: ReferencePolicy::Annotated,
            issue_limit: 10,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (historical prefix matching)
    pub fn permissive() -> Self {
        Self {
            reference_policy: ReferencePolicy::LegacyPrefix,
            ..Self::default()
        }
    }

    /// Create a strict configuration (exact matching only)
    pub fn strict() -> Self {
        Self {
            reference_policy: ReferencePolicy::Exact,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if self.issue_limit == 0 {
            return Err(GatekeeperError::Config(
                "issue_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
