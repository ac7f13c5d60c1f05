//! Trait definitions for external interactions
//!
//! These traits define the boundary between the validation engine and the
//! code that feeds it. Implementations live in other crates.

use crate::ClaimRecord;

/// A producer of claim records
///
/// Implemented by the intake layer (vouch-intake). A source either yields a
/// complete, well-formed batch (possibly empty) or an error; it never yields
/// part of a batch.
pub trait ClaimSource {
    /// Error type for production failures
    type Error;

    /// Name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Whether a failure may be tolerated by dropping this source's records
    fn is_optional(&self) -> bool {
        false
    }

    /// Produce this source's batch
    fn produce(&self) -> Result<Vec<ClaimRecord>, Self::Error>;
}

/// A fixed, in-memory batch of records
///
/// Useful for producers that compute records in code and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    name: String,
    records: Vec<ClaimRecord>,
}

impl StaticSource {
    /// Create a source that always yields `records`
    pub fn new(name: impl Into<String>, records: Vec<ClaimRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

impl ClaimSource for StaticSource {
    type Error = std::convert::Infallible;

    fn name(&self) -> &str {
        &self.name
    }

    fn produce(&self) -> Result<Vec<ClaimRecord>, Self::Error> {
        Ok(self.records.clone())
    }
}
