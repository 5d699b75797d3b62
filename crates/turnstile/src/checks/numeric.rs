//! Integer, float and boolean predicates over string input.

use super::{FloatRange, IntRange};

/// Parses as an `i64` (optional leading sign) and falls inside the bounds.
pub(crate) fn is_int(input: &str, range: IntRange) -> bool {
    let Ok(n) = input.parse::<i64>() else {
        return false;
    };
    range.min.is_none_or(|min| n >= min) && range.max.is_none_or(|max| n <= max)
}

/// Parses as a finite `f64` and falls inside the bounds.
pub(crate) fn is_float(input: &str, range: FloatRange) -> bool {
    let Ok(n) = input.parse::<f64>() else {
        return false;
    };
    if !n.is_finite() {
        return false;
    }
    range.min.is_none_or(|min| n >= min) && range.max.is_none_or(|max| n <= max)
}

/// One of the four conventional boolean spellings.
pub(crate) fn is_boolean(input: &str) -> bool {
    matches!(input, "true" | "false" | "1" | "0")
}

/// Parses as an `i64` and divides evenly by `n`. Never true for `n == 0`.
pub(crate) fn is_divisible_by(input: &str, n: i64) -> bool {
    if n == 0 {
        return false;
    }
    input.parse::<i64>().is_ok_and(|v| v % n == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_respects_bounds() {
        assert!(is_int("42", IntRange::default()));
        assert!(is_int("-3", IntRange::default()));
        assert!(is_int("50", IntRange::between(1, 100)));
        assert!(!is_int("150", IntRange::between(1, 100)));
        assert!(!is_int("1.5", IntRange::default()));
        assert!(!is_int("abc", IntRange::default()));
    }

    #[test]
    fn float_rejects_non_finite() {
        assert!(is_float("1.5", FloatRange::default()));
        assert!(is_float("-0.25", FloatRange::default()));
        assert!(!is_float("inf", FloatRange::default()));
        assert!(!is_float("NaN", FloatRange::default()));
        assert!(!is_float(
            "2.0",
            FloatRange {
                min: None,
                max: Some(1.0)
            }
        ));
    }

    #[test]
    fn boolean_spellings() {
        for ok in ["true", "false", "1", "0"] {
            assert!(is_boolean(ok));
        }
        assert!(!is_boolean("yes"));
        assert!(!is_boolean("TRUE"));
    }

    #[test]
    fn divisibility() {
        assert!(is_divisible_by("15", 5));
        assert!(!is_divisible_by("16", 5));
        assert!(!is_divisible_by("15", 0));
        assert!(!is_divisible_by("abc", 5));
    }
}
