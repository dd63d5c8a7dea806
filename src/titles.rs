use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::WikiError;

/// Accepted page titles: one or more ASCII letters or digits.
///
/// Anything else (separators, dots, spaces, unicode) is rejected before
/// the store is asked to touch the filesystem, so a title can never name
/// a path outside the data directory.
static VALID_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("title regex should be valid"));

/// Check a title against the accepted pattern.
pub fn is_valid(title: &str) -> bool {
    VALID_TITLE.is_match(title)
}

/// Validate a title extracted from the request path, rejecting it with
/// `InvalidTitle` (a 404 at the edge) on mismatch.
pub fn validate(title: &str) -> Result<(), WikiError> {
    if is_valid(title) {
        Ok(())
    } else {
        log::warn!("rejected invalid page title: '{}'", title);
        Err(WikiError::InvalidTitle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_alphanumeric_titles() {
        for title in ["TestPage", "page1", "X", "0", "CamelCase99"] {
            assert!(is_valid(title), "expected '{}' to be accepted", title);
        }
    }

    #[test]
    fn rejects_empty_title() {
        assert!(!is_valid(""));
    }

    #[test]
    fn rejects_path_traversal() {
        for title in ["../etc", "..", "a/b", "/etc/passwd", "a\\b"] {
            assert!(!is_valid(title), "expected '{}' to be rejected", title);
        }
    }

    #[test]
    fn rejects_separators_and_punctuation() {
        for title in ["a b", "a.txt", "a-b", "a!", "{title}"] {
            assert!(!is_valid(title), "expected '{}' to be rejected", title);
        }
    }

    #[test]
    fn rejects_characters_between_uppercase_and_lowercase_ranges() {
        // The ASCII range between 'Z' and 'a'; a sloppy A-z class would
        // let these through.
        for title in ["a[b", "a]b", "a^b", "a_b", "a`b"] {
            assert!(!is_valid(title), "expected '{}' to be rejected", title);
        }
    }

    #[test]
    fn rejects_unicode_titles() {
        assert!(!is_valid("séance"));
        assert!(!is_valid("ページ"));
    }

    #[test]
    fn validate_maps_to_invalid_title_error() {
        assert!(matches!(validate("../etc"), Err(WikiError::InvalidTitle)));
        assert!(validate("GoodTitle").is_ok());
    }
}
