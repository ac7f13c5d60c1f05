//! Vouch Intake
//!
//! Produces claim records for the validation engine and assembles them into
//! a ledger.
//!
//! # Overview
//!
//! Claims arrive in stages. Each stage is a JSON document mapping claim ids
//! to record objects:
//!
//! ```json
//! {
//!   "T1": {
//!     "name": "T1: Non-closure",
//!     "tier": 0,
//!     "passed": true,
//!     "epistemic": "P",
//!     "summary": "...",
//!     "key_result": "...",
//!     "dependencies": ["A1", "A2"]
//!   }
//! }
//! ```
//!
//! Stages are merged in order with last-write-wins semantics. A stage either
//! contributes all of its records or none of them: a malformed optional
//! stage is skipped with a warning, a malformed required stage aborts
//! assembly.
//!
//! # Example Usage
//!
//! ```no_run
//! use vouch_intake::{assemble, FileStage};
//!
//! # fn example() -> Result<(), vouch_intake::IntakeError> {
//! let stages = vec![
//!     FileStage::new("foundations", "stages/t0.json"),
//!     FileStage::new("dark", "stages/dark.json").optional(),
//! ];
//! let assembly = assemble(&stages)?;
//! println!("{} claims, skipped: {:?}", assembly.ledger.len(), assembly.skipped());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assemble;
mod error;
mod parser;
mod stage;

pub use assemble::{assemble, Assembly, StageOutcome, StageReport};
pub use error::IntakeError;
pub use parser::parse_stage;
pub use stage::FileStage;
