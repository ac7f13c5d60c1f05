//! Parse stage documents into claim records

use indexmap::IndexMap;
use serde_json::error::Category;
use serde_json::Value;
use vouch_domain::ClaimRecord;

use crate::error::IntakeError;

/// Parse one stage document
///
/// A stage is a JSON object mapping claim id to record object. Records come
/// back in document order; a repeated id keeps its first position and
/// its last value. Any malformed part rejects the whole stage: a
/// stage is never partially ingested.
pub fn parse_stage(stage: &str, json: &str) -> Result<Vec<ClaimRecord>, IntakeError> {
    let entries: IndexMap<String, Value> = serde_json::from_str(json).map_err(|source| {
        if source.classify() == Category::Data {
            IntakeError::InvalidFormat {
                stage: stage.to_string(),
                reason: format!("Expected a JSON object mapping claim ids to records ({})", source),
            }
        } else {
            IntakeError::JsonParse {
                stage: stage.to_string(),
                source,
            }
        }
    })?;

    let mut records = Vec::with_capacity(entries.len());
    for (id, record) in entries {
        if id.trim().is_empty() {
            return Err(IntakeError::InvalidFormat {
                stage: stage.to_string(),
                reason: "Claim id must not be empty".to_string(),
            });
        }
        match ClaimRecord::from_value(id.as_str(), record) {
            Some(record) => records.push(record),
            None => {
                return Err(IntakeError::InvalidFormat {
                    stage: stage.to_string(),
                    reason: format!("Record '{}' is not a JSON object", id),
                })
            }
        }
    }

    Ok(records)
}
