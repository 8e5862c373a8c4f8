//! Name normalization shared by imports and uniqueness checks.
//!
//! Two records refer to the same entity when their names are equal after
//! trimming surrounding whitespace and lowercasing. Parent lookups during
//! import are stricter: trim only, case preserved.

/// Canonical form used for duplicate detection.
pub fn normalized_name(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Form used when resolving a referenced parent entity by name.
pub fn trimmed_name(value: &str) -> &str {
    value.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_name_trims_and_lowercases() {
        assert_eq!(normalized_name("  Hà Nội "), "hà nội");
        assert_eq!(normalized_name("hà nội"), "hà nội");
        assert_eq!(normalized_name("THÀNH PHỐ HỒ CHÍ MINH"), "thành phố hồ chí minh");
    }

    #[test]
    fn test_normalized_name_equates_case_variants() {
        assert_eq!(normalized_name("Hà Nội"), normalized_name("hà nội "));
        assert_eq!(normalized_name("Đà Nẵng"), normalized_name(" đà nẵng"));
    }

    #[test]
    fn test_trimmed_name_preserves_case() {
        assert_eq!(trimmed_name("  Hà Nội "), "Hà Nội");
        assert_ne!(trimmed_name("hà nội"), trimmed_name("Hà Nội"));
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(normalized_name("   "), "");
        assert_eq!(trimmed_name("   "), "");
    }
}
