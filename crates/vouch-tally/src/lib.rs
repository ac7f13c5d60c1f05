//! Vouch Tally
//!
//! Aggregate statistics over a claim ledger.
//!
//! # Overview
//!
//! The Tally is responsible for:
//! - **Tier statistics**: total, passed and member ids per tier
//! - **Status distribution**: occurrences of each status tag
//! - **Sector verdicts**: named AND-aggregates over configured claim subsets
//! - **Imported facts**: which claims cite which external results
//! - **Gap classification**: configured gap class per claim
//! - **Structural reasons**: configured reason code per `P_structural` claim
//!
//! Aggregation is a pure function of the ledger and the configuration. It
//! never fails and performs no I/O.
//!
//! # Usage
//!
//! ```
//! use vouch_domain::{Claim, Ledger, StatusTag};
//! use vouch_tally::{Tally, TallyConfig};
//!
//! let ledger: Ledger = vec![
//!     Claim::new("base", 0, true, StatusTag::P).into_record("T1"),
//!     Claim::new("next", 0, true, StatusTag::PStructural).into_record("T2"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let report = Tally::new(TallyConfig::default().with_tier(0, "Foundations")).aggregate(&ledger);
//! assert!(report.all_pass);
//! assert_eq!(report.tiers[&0].name, "Foundations");
//! assert_eq!(report.status_counts["P_structural"], 1);
//! ```
//!
//! # Configuration
//!
//! The Tally can be configured via TOML:
//!
//! ```toml
//! [[tiers]]
//! tier = 0
//! name = "Axiom Foundations"
//!
//! [[sectors]]
//! name = "gauge"
//! claims = ["T_channels", "T7", "T_gauge", "T5"]
//!
//! [gaps]
//! default_class = "reduced"
//!
//! [[gaps.classes]]
//! name = "closed"
//! description = "Derived from the axioms alone"
//! claims = ["T1", "T2"]
//!
//! [structural_reasons]
//! default_reason = "other"
//!
//! [[structural_reasons.codes]]
//! name = "qft_import"
//! claims = ["T6", "T6B"]
//! ```

#![warn(missing_docs)]

mod aggregate;
mod config;
mod error;
mod gaps;
mod reasons;

pub use aggregate::{
    sector_verdict, AggregateReport, GapClassification, ImportedFact, Tally, TierStats,
    UNASSIGNED_TIER, UNKNOWN_STATUS,
};
pub use config::{Sector, TallyConfig, TierLabel};
pub use error::TallyError;
pub use gaps::{GapClass, GapNote, GapRegistry};
pub use reasons::{ReasonCode, ReasonRegistry};
