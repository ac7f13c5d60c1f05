//! Record schema checks

use std::fmt;

use serde_json::Value;
use vouch_domain::{fields, ClaimRecord, StatusTag};

/// A structural problem with a single claim record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// Required fields absent, in required-field order
    MissingFields(Vec<&'static str>),

    /// `passed` is present but not a boolean
    PassedNotBool {
        /// JSON type actually found
        found: &'static str,
    },

    /// `dependencies` is present but not a list
    DependenciesNotList {
        /// JSON type actually found
        found: &'static str,
    },

    /// An entry of `dependencies` is not a string
    DependencyNotString {
        /// Position in the list
        index: usize,
        /// JSON type actually found
        found: &'static str,
    },

    /// `epistemic` is not a member of the closed tag set
    UnknownStatus(String),
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::MissingFields(missing) => {
                write!(f, "missing fields: {}", missing.join(", "))
            }
            SchemaViolation::PassedNotBool { found } => {
                write!(f, "'passed' must be a boolean, got {}", found)
            }
            SchemaViolation::DependenciesNotList { found } => {
                write!(f, "'dependencies' must be a list, got {}", found)
            }
            SchemaViolation::DependencyNotString { index, found } => {
                write!(f, "'dependencies[{}]' must be a string, got {}", index, found)
            }
            SchemaViolation::UnknownStatus(tag) => write!(f, "unknown epistemic tag '{}'", tag),
        }
    }
}

/// JSON type name used in violation messages
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Check one record against the required-field, type and enum contract
///
/// Never fails; returns every violation found. Type and enum checks only
/// apply to fields that are present, so an absent field is reported once,
/// as missing. An empty result says nothing about whether the record's
/// dependencies resolve.
pub fn validate_schema(record: &ClaimRecord) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();

    let missing: Vec<&'static str> = fields::REQUIRED
        .iter()
        .copied()
        .filter(|field| !record.has(field))
        .collect();
    if !missing.is_empty() {
        violations.push(SchemaViolation::MissingFields(missing));
    }

    if let Some(passed) = record.get(fields::PASSED) {
        if !passed.is_boolean() {
            violations.push(SchemaViolation::PassedNotBool {
                found: json_type(passed),
            });
        }
    }

    match record.get(fields::DEPENDENCIES) {
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                if !item.is_string() {
                    violations.push(SchemaViolation::DependencyNotString {
                        index,
                        found: json_type(item),
                    });
                }
            }
        }
        Some(other) => violations.push(SchemaViolation::DependenciesNotList {
            found: json_type(other),
        }),
        None => {}
    }

    if let Some(tag) = record.get(fields::EPISTEMIC) {
        let known = tag.as_str().and_then(StatusTag::parse).is_some();
        if !known {
            let shown = match tag {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            violations.push(SchemaViolation::UnknownStatus(shown));
        }
    }

    violations
}
