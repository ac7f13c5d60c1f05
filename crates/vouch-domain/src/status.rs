//! Status module - epistemic strength tags for claims

use std::fmt;

/// Epistemic status tag of a claim
///
/// The set is closed: any other value in a record's `epistemic` field is a
/// schema violation. Tags are ordered from strongest to weakest:
/// - P: Proved outright
/// - P_structural: Structurally derived, leaning on imported results
/// - C_structural: Conditional on a structural import or regime
/// - C: Conditional / conjectural
/// - W: Witnessed by a finite certificate
/// - ERROR: The producer failed to compute the claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusTag {
    /// Proved
    P,

    /// Structurally derived
    PStructural,

    /// Conditional on structural imports
    CStructural,

    /// Conditional
    C,

    /// Witnessed
    W,

    /// Producer error
    Error,
}

impl StatusTag {
    /// Every member of the closed set, in canonical order
    pub const ALL: [StatusTag; 6] = [
        StatusTag::P,
        StatusTag::PStructural,
        StatusTag::CStructural,
        StatusTag::C,
        StatusTag::W,
        StatusTag::Error,
    ];

    /// Get the tag as it appears in records
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::P => "P",
            StatusTag::PStructural => "P_structural",
            StatusTag::CStructural => "C_structural",
            StatusTag::C => "C",
            StatusTag::W => "W",
            StatusTag::Error => "ERROR",
        }
    }

    /// Parse a tag from its record spelling
    ///
    /// Matching is exact: `"p"` is not `P`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid epistemic tag: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for tag in StatusTag::ALL {
            assert_eq!(StatusTag::parse(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(StatusTag::parse("p"), None);
        assert_eq!(StatusTag::parse("error"), None);
        assert_eq!(StatusTag::parse("P_Structural"), None);
        assert_eq!(StatusTag::parse(""), None);
    }

    #[test]
    fn test_from_str_error_names_value() {
        let err = "Q".parse::<StatusTag>().unwrap_err();
        assert!(err.contains("Q"));
    }
}
