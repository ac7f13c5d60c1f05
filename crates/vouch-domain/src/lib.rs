//! Vouch Domain Layer
//!
//! This crate contains the data model shared by every Vouch crate: claim
//! records, status tags, the dependency vocabulary, and the ordered ledger
//! that producers fill and the validation engine reads.
//!
//! ## Key Concepts
//!
//! - **Claim record**: an entry asserting an outcome and naming its dependencies
//! - **Status tag**: the epistemic strength of a claim, from a closed set
//! - **Vocabulary**: axioms and known externals, valid dependency targets
//!   that are never claims themselves
//! - **Ledger**: an ordered batch of records, merged stage by stage
//!
//! ## Architecture
//!
//! - No I/O: records are built in memory by producers
//! - Records stay loosely typed so the schema validator sees raw input
//! - Trait definitions for producers live in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod ledger;
pub mod reference;
pub mod status;
pub mod traits;
pub mod vocabulary;

// Re-exports for convenience
pub use claim::{fields, Claim, ClaimId, ClaimRecord};
pub use ledger::Ledger;
pub use reference::{cites_axiom, normalize_reference};
pub use status::StatusTag;
pub use traits::{ClaimSource, StaticSource};
pub use vocabulary::Vocabulary;
