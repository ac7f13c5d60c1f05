//! Configuration for Tally operations
//!
//! Defines tier labels, named sectors and the optional gap registry.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::gaps::GapRegistry;
use crate::reasons::ReasonRegistry;
use crate::TallyError;

/// Display name for one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLabel {
    /// Tier number as it appears in records
    pub tier: i64,

    /// Human-readable tier name
    pub name: String,
}

/// A named subset of claims whose verdict is the AND of their outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    /// Sector name, unique within a configuration
    pub name: String,

    /// Claim ids in the sector; ids absent from the ledger are skipped
    #[serde(default)]
    pub claims: Vec<String>,
}

impl Sector {
    /// Create a sector from a name and its claim ids
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

/// Configuration for the Tally
///
/// Every section is optional. Without tier labels, tiers are named
/// `Tier <n>`. Sectors, gap classification and structural reason codes are
/// only computed when configured.
///
/// # Examples
///
/// ```
/// use vouch_tally::{Sector, TallyConfig};
///
/// let config = TallyConfig::default()
///     .with_tier(0, "Axiom Foundations")
///     .with_sector(Sector::new("gauge", ["T4", "T5"]));
/// assert_eq!(config.tier_name(0), "Axiom Foundations");
/// assert_eq!(config.tier_name(7), "Tier 7");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Tier display names
    pub tiers: Vec<TierLabel>,

    /// Named sectors, in report order
    pub sectors: Vec<Sector>,

    /// Gap registry, when gap classification is wanted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaps: Option<GapRegistry>,

    /// Reason codes for `P_structural` claims
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_reasons: Option<ReasonRegistry>,
}

impl TallyConfig {
    /// Add a tier label
    pub fn with_tier(mut self, tier: i64, name: impl Into<String>) -> Self {
        self.tiers.push(TierLabel {
            tier,
            name: name.into(),
        });
        self
    }

    /// Add a sector
    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.sectors.push(sector);
        self
    }

    /// Attach a gap registry
    pub fn with_gaps(mut self, gaps: GapRegistry) -> Self {
        self.gaps = Some(gaps);
        self
    }

    /// Attach a structural reason registry
    pub fn with_structural_reasons(mut self, reasons: ReasonRegistry) -> Self {
        self.structural_reasons = Some(reasons);
        self
    }

    /// Display name for a tier
    pub fn tier_name(&self, tier: i64) -> String {
        self.tiers
            .iter()
            .find(|label| label.tier == tier)
            .map(|label| label.name.clone())
            .unwrap_or_else(|| format!("Tier {}", tier))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), TallyError> {
        let mut seen_tiers = BTreeSet::new();
        for label in &self.tiers {
            if !seen_tiers.insert(label.tier) {
                return Err(TallyError::Config(format!(
                    "tier {} is labelled more than once",
                    label.tier
                )));
            }
        }

        let mut seen_sectors = BTreeSet::new();
        for sector in &self.sectors {
            if sector.name.trim().is_empty() {
                return Err(TallyError::Config("sector name must not be empty".to_string()));
            }
            if !seen_sectors.insert(sector.name.as_str()) {
                return Err(TallyError::DuplicateSector(sector.name.clone()));
            }
        }

        if let Some(gaps) = &self.gaps {
            gaps.validate()?;
        }
        if let Some(reasons) = &self.structural_reasons {
            reasons.validate()?;
        }

        Ok(())
    }
}
