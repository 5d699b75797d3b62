//! Format predicates: email, URL, UUID, ISO 8601, hex, Base64, JSON, slug.

use std::sync::LazyLock;

use base64::Engine as _;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email regex is valid")
});

static URL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url regex is valid")
});

static SLUG_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex is valid")
});

pub(crate) fn is_email(input: &str) -> bool {
    EMAIL_REGEX.is_match(input)
}

pub(crate) fn is_url(input: &str) -> bool {
    URL_REGEX.is_match(input)
}

pub(crate) fn is_slug(input: &str) -> bool {
    SLUG_REGEX.is_match(input)
}

/// Canonical 8-4-4-4-12 hex form, any case.
pub(crate) fn is_uuid(input: &str) -> bool {
    let bytes = input.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

/// Hex digits with an optional `0x`/`0X` prefix.
pub(crate) fn is_hex(input: &str) -> bool {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Standard-alphabet Base64 with correct padding.
pub(crate) fn is_base64(input: &str) -> bool {
    base64::engine::general_purpose::STANDARD
        .decode(input)
        .is_ok()
}

/// Any well-formed JSON document (scalars included).
pub(crate) fn is_json(input: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(input).is_ok()
}

/// Parses an ISO 8601 date or datetime.
///
/// Accepted shapes, tried in order:
/// - RFC 3339 (`2024-06-01T12:00:00Z`, offset variants)
/// - naive datetime with optional fractional seconds, taken as UTC
/// - bare date, taken as UTC midnight
///
/// Shared with the `to_date` sanitizer so that "validates as a date" and
/// "converts to a date" can never disagree.
pub(crate) fn parse_iso8601(input: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(midnight.and_utc().fixed_offset());
    }
    None
}
