//! Character-class and length predicates.

use super::LengthRange;

/// Non-empty and digits only.
pub(crate) fn is_numeric(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
}

/// Non-empty and letters only.
pub(crate) fn is_alpha(input: &str) -> bool {
    !input.is_empty() && input.chars().all(char::is_alphabetic)
}

/// Non-empty and letters or digits only.
pub(crate) fn is_alphanumeric(input: &str) -> bool {
    !input.is_empty() && input.chars().all(char::is_alphanumeric)
}

/// No uppercase letters (non-letters are ignored).
pub(crate) fn is_lowercase(input: &str) -> bool {
    input.chars().all(|c| !c.is_alphabetic() || c.is_lowercase())
}

/// No lowercase letters (non-letters are ignored).
pub(crate) fn is_uppercase(input: &str) -> bool {
    input.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}

/// Character count within the given bounds. Counts scalar values, not
/// bytes, so multi-byte input is measured the way a user would count it.
pub(crate) fn is_length(input: &str, range: LengthRange) -> bool {
    let len = input.chars().count();
    range.min.is_none_or(|min| len >= min) && range.max.is_none_or(|max| len <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_rejects_signs_and_decimals() {
        assert!(is_numeric("12345"));
        assert!(!is_numeric("123.45"));
        assert!(!is_numeric("-1"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn alpha_and_alphanumeric() {
        assert!(is_alpha("hello"));
        assert!(!is_alpha("hello123"));
        assert!(is_alphanumeric("hello123"));
        assert!(!is_alphanumeric("hello_123"));
        assert!(!is_alphanumeric(""));
    }

    #[test]
    fn case_checks_ignore_non_letters() {
        assert!(is_lowercase("hello123"));
        assert!(!is_lowercase("Hello"));
        assert!(is_uppercase("HELLO123"));
        assert!(!is_uppercase("Hello"));
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(is_length("héllo", LengthRange::between(5, 5)));
        assert!(!is_length("hi", LengthRange::between(3, 20)));
        assert!(is_length("anything", LengthRange::default()));
    }
}
