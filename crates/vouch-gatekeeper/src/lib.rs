//! Vouch Gatekeeper
//!
//! Checks that a claim ledger is internally consistent before any summary of
//! it is trusted.
//!
//! The Gatekeeper provides:
//! - Record schema checks (required fields, types, status tag set)
//! - Dependency resolution against claim ids, axioms and known externals
//! - Dependency graph construction over claim ids
//! - Circular dependency detection
//!
//! # Examples
//!
//! ```
//! use vouch_domain::{Ledger, Vocabulary};
//! use vouch_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default(), Vocabulary::default());
//! let report = gatekeeper.validate(&Ledger::new());
//! assert!(report.valid);
//! ```

#![warn(missing_docs)]

mod config;
mod cycles;
mod error;
mod graph;
mod schema;
mod validator;

pub use config::{ReferencePolicy, ValidationConfig};
pub use cycles::{detect_cycles, Cycle};
pub use error::GatekeeperError;
pub use graph::DependencyGraph;
pub use schema::{validate_schema, SchemaViolation};
pub use validator::{Gatekeeper, Issue, ValidationReport};
