//! Dependency reference normalization
//!
//! Producers cite dependencies as free strings. A citation may carry a
//! parenthetical annotation (`"T8 (d=4)"`), so matching happens on the
//! normalized form: everything from the first `(` onward is cut and the
//! remainder trimmed.

/// Normalize a dependency reference for matching
///
/// # Examples
///
/// ```
/// use vouch_domain::normalize_reference;
///
/// assert_eq!(normalize_reference("T8 (d=4)"), "T8");
/// assert_eq!(normalize_reference("  T3 "), "T3");
/// assert_eq!(normalize_reference("(orphan)"), "");
/// ```
pub fn normalize_reference(reference: &str) -> &str {
    let head = match reference.find('(') {
        Some(idx) => &reference[..idx],
        None => reference,
    };
    head.trim()
}

/// Whether `reference` cites `axiom` with an annotation
///
/// True when `reference` starts with `axiom` and the next character (if any)
/// cannot continue an identifier, e.g. `"A1 (finite capacity)"` or
/// `"A4: irreversibility"`. `"A10"` does not cite `"A1"`.
pub fn cites_axiom(reference: &str, axiom: &str) -> bool {
    if axiom.is_empty() {
        return false;
    }
    match reference.strip_prefix(axiom) {
        Some(rest) => rest
            .chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_')),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_parenthetical() {
        assert_eq!(normalize_reference("T_gauge"), "T_gauge");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(normalize_reference(""), "");
        assert_eq!(normalize_reference("   "), "");
    }

    #[test]
    fn test_nested_parentheses() {
        assert_eq!(normalize_reference("T4 (anomaly (mixed) scan)"), "T4");
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        assert_eq!(normalize_reference("T4 (open"), "T4");
        assert_eq!(normalize_reference("T4 close)"), "T4 close)");
    }

    #[test]
    fn test_internal_whitespace_preserved() {
        assert_eq!(
            normalize_reference("Gamma_geo closure (R11)"),
            "Gamma_geo closure"
        );
    }

    #[test]
    fn test_cites_axiom_boundaries() {
        assert!(cites_axiom("A1", "A1"));
        assert!(cites_axiom("A1 (finite capacity)", "A1"));
        assert!(cites_axiom("A4: irreversibility", "A4"));
        assert!(!cites_axiom("A10", "A1"));
        assert!(!cites_axiom("A10_unrelated", "A1"));
        assert!(!cites_axiom("A1_x", "A1"));
        assert!(!cites_axiom("B1", "A1"));
        assert!(!cites_axiom("A1", ""));
    }
}
