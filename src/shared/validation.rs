use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating respondent login names
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "htx_badinh", "qtd001", "_admin", "HTXHanoi"
    /// - Invalid: "1htx", "htx-hanoi", "htx hanoi"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_regex_valid() {
        assert!(USERNAME_REGEX.is_match("htx_badinh"));
        assert!(USERNAME_REGEX.is_match("qtd001"));
        assert!(USERNAME_REGEX.is_match("_internal"));
        assert!(USERNAME_REGEX.is_match("HTXHanoi"));
    }

    #[test]
    fn test_username_regex_invalid() {
        assert!(!USERNAME_REGEX.is_match("1htx")); // starts with digit
        assert!(!USERNAME_REGEX.is_match("htx hanoi")); // space
        assert!(!USERNAME_REGEX.is_match("htx-hanoi")); // hyphen
        assert!(!USERNAME_REGEX.is_match("")); // empty
        assert!(!USERNAME_REGEX.is_match("htx@qtd")); // symbol
    }
}
