//! Ledger module - an ordered batch of claim records

use indexmap::IndexMap;

use crate::{ClaimId, ClaimRecord};

/// An ordered batch of claim records keyed by id
///
/// Insertion order is kept for stable report ordering; it has no bearing on
/// validation. Re-inserting an id replaces the record but keeps the id's
/// original position, so later merge stages layer over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: IndexMap<ClaimId, ClaimRecord>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record it replaced
    pub fn insert(&mut self, record: ClaimRecord) -> Option<ClaimRecord> {
        self.records.insert(record.id().clone(), record)
    }

    /// Merge a stage of records over the ledger (last write wins)
    ///
    /// Returns the ids that replaced an existing record. Overwrites are
    /// intentional layering, not conflicts.
    pub fn merge_stage<I>(&mut self, stage: I) -> Vec<ClaimId>
    where
        I: IntoIterator<Item = ClaimRecord>,
    {
        let mut replaced = Vec::new();
        for record in stage {
            let id = record.id().clone();
            if self.insert(record).is_some() {
                replaced.push(id);
            }
        }
        replaced
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&ClaimRecord> {
        self.records.get(id)
    }

    /// Whether the ledger holds a claim with this id
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &ClaimRecord> {
        self.records.values()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &ClaimId> {
        self.records.keys()
    }
}

impl FromIterator<ClaimRecord> for Ledger {
    fn from_iter<T: IntoIterator<Item = ClaimRecord>>(iter: T) -> Self {
        let mut ledger = Ledger::new();
        ledger.merge_stage(iter);
        ledger
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a ClaimRecord;
    type IntoIter = indexmap::map::Values<'a, ClaimId, ClaimRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Claim, StatusTag};

    fn claim(id: &str, passed: bool) -> ClaimRecord {
        Claim::new(id, 0, passed, StatusTag::P).into_record(id)
    }

    #[test]
    fn test_insertion_order_preserved() {
        let ledger: Ledger = vec![claim("T3", true), claim("T1", true), claim("T2", true)]
            .into_iter()
            .collect();
        let ids: Vec<&str> = ledger.ids().map(ClaimId::as_str).collect();
        assert_eq!(ids, vec!["T3", "T1", "T2"]);
    }

    #[test]
    fn test_merge_stage_last_write_wins() {
        let mut ledger = Ledger::new();
        ledger.merge_stage(vec![claim("T1", true), claim("T2", true)]);
        let replaced = ledger.merge_stage(vec![claim("T1", false), claim("T9", true)]);

        assert_eq!(replaced, vec![ClaimId::new("T1")]);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get("T1").and_then(ClaimRecord::passed), Some(false));

        // Overwritten id keeps its first position
        let ids: Vec<&str> = ledger.ids().map(ClaimId::as_str).collect();
        assert_eq!(ids, vec!["T1", "T2", "T9"]);
    }

    #[test]
    fn test_lookup() {
        let ledger: Ledger = vec![claim("T1", true)].into_iter().collect();
        assert!(ledger.contains("T1"));
        assert!(!ledger.contains("T2"));
        assert!(ledger.get("T2").is_none());
        assert!(!ledger.is_empty());
    }
}
