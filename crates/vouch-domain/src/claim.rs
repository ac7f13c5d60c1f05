//! Claim module - the atomic unit of a ledger

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::StatusTag;

/// Field names of a claim record as producers spell them
pub mod fields {
    /// Human-readable claim name
    pub const NAME: &str = "name";
    /// Integer grouping value
    pub const TIER: &str = "tier";
    /// Boolean outcome
    pub const PASSED: &str = "passed";
    /// Status tag
    pub const EPISTEMIC: &str = "epistemic";
    /// Free-text summary
    pub const SUMMARY: &str = "summary";
    /// Free-text headline result
    pub const KEY_RESULT: &str = "key_result";
    /// Ordered dependency references
    pub const DEPENDENCIES: &str = "dependencies";
    /// Optional catalog of external facts the claim leans on
    pub const IMPORTED_THEOREMS: &str = "imported_theorems";
    /// Optional regime gate descriptions
    pub const REGIME_GATES: &str = "regime_gates";

    /// Fields every record must carry, in reporting order
    pub const REQUIRED: [&str; 7] = [NAME, TIER, PASSED, EPISTEMIC, SUMMARY, KEY_RESULT, DEPENDENCIES];
}

/// Identifier of a claim within a ledger
///
/// Ids are opaque strings chosen by producers (`"T8"`, `"Gamma_closure"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Create a claim id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClaimId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClaimId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::borrow::Borrow<str> for ClaimId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A claim record as handed over by a producer
///
/// Records are kept as raw JSON objects: the schema validator has to see
/// exactly what the producer supplied, including wrong types. The typed
/// accessors return `None` when a field is absent or has the wrong type.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimRecord {
    id: ClaimId,
    fields: Map<String, Value>,
}

impl ClaimRecord {
    /// Wrap a raw field map
    pub fn from_fields(id: impl Into<ClaimId>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a record from a JSON value
    ///
    /// Returns `None` unless the value is an object.
    pub fn from_value(id: impl Into<ClaimId>, value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::from_fields(id, fields)),
            _ => None,
        }
    }

    /// Claim id
    pub fn id(&self) -> &ClaimId {
        &self.id
    }

    /// Raw field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Raw value of a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the field is present (with any value, including null)
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Claim name
    pub fn name(&self) -> Option<&str> {
        self.get(fields::NAME).and_then(Value::as_str)
    }

    /// Tier, when it is an integer
    pub fn tier(&self) -> Option<i64> {
        self.get(fields::TIER).and_then(Value::as_i64)
    }

    /// Outcome, when it is a genuine boolean
    pub fn passed(&self) -> Option<bool> {
        self.get(fields::PASSED).and_then(Value::as_bool)
    }

    /// Whether the record positively reports success
    ///
    /// Anything other than boolean `true` counts as not passed.
    pub fn is_passed(&self) -> bool {
        self.passed() == Some(true)
    }

    /// Raw status tag string
    pub fn epistemic(&self) -> Option<&str> {
        self.get(fields::EPISTEMIC).and_then(Value::as_str)
    }

    /// Status tag, when it belongs to the closed set
    pub fn status(&self) -> Option<StatusTag> {
        self.epistemic().and_then(StatusTag::parse)
    }

    /// Summary text
    pub fn summary(&self) -> Option<&str> {
        self.get(fields::SUMMARY).and_then(Value::as_str)
    }

    /// Key result text
    pub fn key_result(&self) -> Option<&str> {
        self.get(fields::KEY_RESULT).and_then(Value::as_str)
    }

    /// String dependency references in declared order
    ///
    /// Non-string entries and a non-list field yield nothing; those are
    /// reported by the schema validator.
    pub fn dependencies(&self) -> Vec<&str> {
        match self.get(fields::DEPENDENCIES) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Imported external facts, if declared
    pub fn imported_theorems(&self) -> Option<&Map<String, Value>> {
        self.get(fields::IMPORTED_THEOREMS).and_then(Value::as_object)
    }
}

/// A well-typed claim, for producers that build records in code
///
/// Converting into a [`ClaimRecord`] always yields a schema-clean record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Human-readable name
    pub name: String,

    /// Tier grouping value
    pub tier: i64,

    /// Outcome
    pub passed: bool,

    /// Status tag
    pub epistemic: String,

    /// Free-text summary
    pub summary: String,

    /// Headline result
    pub key_result: String,

    /// Dependency references
    pub dependencies: Vec<String>,

    /// External facts the claim leans on
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub imported_theorems: Map<String, Value>,

    /// Regime gate descriptions
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub regime_gates: Map<String, Value>,
}

impl Claim {
    /// Create a claim with no imports or regime gates
    pub fn new(name: impl Into<String>, tier: i64, passed: bool, status: StatusTag) -> Self {
        Self {
            name: name.into(),
            tier,
            passed,
            epistemic: status.as_str().to_string(),
            summary: String::new(),
            key_result: String::new(),
            dependencies: Vec::new(),
            imported_theorems: Map::new(),
            regime_gates: Map::new(),
        }
    }

    /// Set the summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the key result
    pub fn with_key_result(mut self, key_result: impl Into<String>) -> Self {
        self.key_result = key_result.into();
        self
    }

    /// Set the dependency references
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Add an imported fact with a plain description
    pub fn with_import(mut self, fact: impl Into<String>, description: impl Into<String>) -> Self {
        self.imported_theorems
            .insert(fact.into(), Value::String(description.into()));
        self
    }

    /// Convert into a raw record under the given id
    pub fn into_record(self, id: impl Into<ClaimId>) -> ClaimRecord {
        let mut map = Map::new();
        map.insert(fields::NAME.into(), Value::String(self.name));
        map.insert(fields::TIER.into(), Value::from(self.tier));
        map.insert(fields::PASSED.into(), Value::Bool(self.passed));
        map.insert(fields::EPISTEMIC.into(), Value::String(self.epistemic));
        map.insert(fields::SUMMARY.into(), Value::String(self.summary));
        map.insert(fields::KEY_RESULT.into(), Value::String(self.key_result));
        map.insert(
            fields::DEPENDENCIES.into(),
            Value::Array(self.dependencies.into_iter().map(Value::String).collect()),
        );
        if !self.imported_theorems.is_empty() {
            map.insert(
                fields::IMPORTED_THEOREMS.into(),
                Value::Object(self.imported_theorems),
            );
        }
        if !self.regime_gates.is_empty() {
            map.insert(fields::REGIME_GATES.into(), Value::Object(self.regime_gates));
        }
        ClaimRecord::from_fields(id, map)
    }
}
