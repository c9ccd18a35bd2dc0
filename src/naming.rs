//! Naming functions: turn a field identifier into a parameter name.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// A pure identifier-to-name transform.
pub type NamingFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

// Pre-compiled word boundary patterns
static ACRONYM_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\p{Lu}+)(\p{Lu}\p{Ll})").unwrap()
});

static CASE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\p{Ll}\p{N}])(\p{Lu})").unwrap()
});

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}]+").unwrap()
});

/// Convert an identifier to lowercase words joined by underscores.
///
/// Word boundaries follow Unicode letter case, so non-ASCII letters are
/// kept and lowercased rather than treated as separators.
///
/// ```
/// use namedargs::naming::snake_case;
///
/// assert_eq!(snake_case("GivenName"), "given_name");
/// assert_eq!(snake_case("HTTPServer"), "http_server");
/// assert_eq!(snake_case("given_name"), "given_name");
/// ```
pub fn snake_case(input: &str) -> String {
    let split = ACRONYM_BOUNDARY.replace_all(input, "${1}_${2}");
    let split = CASE_BOUNDARY.replace_all(&split, "${1}_${2}");
    let joined = SEPARATOR_RUN.replace_all(&split, "_");
    joined.trim_matches('_').to_lowercase()
}

/// Leave identifiers untouched.
pub fn identity(input: &str) -> String {
    input.to_string()
}

/// The default naming function, [`snake_case`].
pub fn default_naming() -> NamingFn {
    Arc::new(snake_case)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_words() {
        assert_eq!(snake_case("GivenName"), "given_name");
        assert_eq!(snake_case("Surname"), "surname");
        assert_eq!(snake_case("CreatedAt"), "created_at");
        assert_eq!(snake_case("givenName"), "given_name");
    }

    #[test]
    fn test_snake_case_acronyms_and_digits() {
        assert_eq!(snake_case("ID"), "id");
        assert_eq!(snake_case("UserID"), "user_id");
        assert_eq!(snake_case("HTTPServer"), "http_server");
        assert_eq!(snake_case("Address2Line"), "address2_line");
    }

    #[test]
    fn test_snake_case_separators() {
        assert_eq!(snake_case("given_name"), "given_name");
        assert_eq!(snake_case("given-name"), "given_name");
        assert_eq!(snake_case("Given Name"), "given_name");
        assert_eq!(snake_case("__private"), "private");
        assert_eq!(snake_case(""), "");
    }

    #[test]
    fn test_snake_case_non_ascii() {
        assert_eq!(snake_case("ÉtatCivil"), "état_civil");
        assert_eq!(snake_case("Größe"), "größe");
        assert_eq!(snake_case("Grüße"), "grüße");
        assert_eq!(snake_case("naïve"), "naïve");
        assert_eq!(snake_case("ΑλφαΒήτα"), "αλφα_βήτα");
        assert_ne!(snake_case("Größe"), snake_case("Grüße"));
    }

    #[test]
    fn test_identity() {
        assert_eq!(identity("GivenName"), "GivenName");
        assert_eq!((default_naming())("GivenName"), "given_name");
    }
}
