//! The closed set of named validation checks.
//!
//! Every built-in validator a chain can carry is one variant of
//! [`CheckKind`]; dispatch is a plain `match` over the enum, so an unknown
//! check name is unrepresentable. The predicates themselves are pure
//! `(&str, params) -> bool` functions grouped by category:
//!
//! - [`string`] — character-class and length checks
//! - [`numeric`] — integer/float parsing and range checks
//! - [`format`] — email, URL, UUID, ISO 8601, hex, Base64, JSON, slug
//! - [`network`] — IP, port, hostname, MAC address

pub(crate) mod format;
pub(crate) mod network;
pub(crate) mod numeric;
pub(crate) mod string;

use regex::Regex;

/// Optional integer bounds for [`CheckKind::IsInt`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl IntRange {
    /// Bounds from an inclusive min/max pair.
    #[must_use]
    pub const fn between(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Optional float bounds for [`CheckKind::IsFloat`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloatRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Optional character-count bounds for [`CheckKind::IsLength`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthRange {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl LengthRange {
    /// Bounds from an inclusive min/max pair.
    #[must_use]
    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// One named validation check, with its parameters.
#[derive(Debug, Clone)]
pub enum CheckKind {
    IsInt(IntRange),
    IsFloat(FloatRange),
    IsBoolean,
    IsNumeric,
    IsAlpha,
    IsAlphanumeric,
    IsAscii,
    IsLowercase,
    IsUppercase,
    IsLength(LengthRange),
    NotEmpty,
    Matches(Regex),
    IsIn(Vec<String>),
    Contains(String),
    Equals(String),
    StartsWith(String),
    EndsWith(String),
    IsEmail,
    IsUrl,
    IsUuid,
    IsIso8601,
    IsIp,
    IsIpv4,
    IsIpv6,
    IsPort,
    IsHostname,
    IsMacAddress,
    IsHex,
    IsBase64,
    IsJson,
    IsSlug,
    IsDivisibleBy(i64),
}

impl CheckKind {
    /// Runs the check against the rendered working value.
    #[must_use]
    pub fn run(&self, input: &str) -> bool {
        match self {
            Self::IsInt(range) => numeric::is_int(input, *range),
            Self::IsFloat(range) => numeric::is_float(input, *range),
            Self::IsBoolean => numeric::is_boolean(input),
            Self::IsNumeric => string::is_numeric(input),
            Self::IsAlpha => string::is_alpha(input),
            Self::IsAlphanumeric => string::is_alphanumeric(input),
            Self::IsAscii => input.is_ascii(),
            Self::IsLowercase => string::is_lowercase(input),
            Self::IsUppercase => string::is_uppercase(input),
            Self::IsLength(range) => string::is_length(input, *range),
            Self::NotEmpty => !input.is_empty(),
            Self::Matches(pattern) => pattern.is_match(input),
            Self::IsIn(values) => values.iter().any(|v| v == input),
            Self::Contains(needle) => input.contains(needle.as_str()),
            Self::Equals(expected) => input == expected,
            Self::StartsWith(prefix) => input.starts_with(prefix.as_str()),
            Self::EndsWith(suffix) => input.ends_with(suffix.as_str()),
            Self::IsEmail => format::is_email(input),
            Self::IsUrl => format::is_url(input),
            Self::IsUuid => format::is_uuid(input),
            Self::IsIso8601 => format::parse_iso8601(input).is_some(),
            Self::IsIp => network::is_ip(input),
            Self::IsIpv4 => network::is_ipv4(input),
            Self::IsIpv6 => network::is_ipv6(input),
            Self::IsPort => network::is_port(input),
            Self::IsHostname => network::is_hostname(input),
            Self::IsMacAddress => network::is_mac_address(input),
            Self::IsHex => format::is_hex(input),
            Self::IsBase64 => format::is_base64(input),
            Self::IsJson => format::is_json(input),
            Self::IsSlug => format::is_slug(input),
            Self::IsDivisibleBy(n) => numeric::is_divisible_by(input, *n),
        }
    }

    /// Stable snake_case name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IsInt(_) => "is_int",
            Self::IsFloat(_) => "is_float",
            Self::IsBoolean => "is_boolean",
            Self::IsNumeric => "is_numeric",
            Self::IsAlpha => "is_alpha",
            Self::IsAlphanumeric => "is_alphanumeric",
            Self::IsAscii => "is_ascii",
            Self::IsLowercase => "is_lowercase",
            Self::IsUppercase => "is_uppercase",
            Self::IsLength(_) => "is_length",
            Self::NotEmpty => "not_empty",
            Self::Matches(_) => "matches",
            Self::IsIn(_) => "is_in",
            Self::Contains(_) => "contains",
            Self::Equals(_) => "equals",
            Self::StartsWith(_) => "starts_with",
            Self::EndsWith(_) => "ends_with",
            Self::IsEmail => "is_email",
            Self::IsUrl => "is_url",
            Self::IsUuid => "is_uuid",
            Self::IsIso8601 => "is_iso8601",
            Self::IsIp => "is_ip",
            Self::IsIpv4 => "is_ipv4",
            Self::IsIpv6 => "is_ipv6",
            Self::IsPort => "is_port",
            Self::IsHostname => "is_hostname",
            Self::IsMacAddress => "is_mac_address",
            Self::IsHex => "is_hex",
            Self::IsBase64 => "is_base64",
            Self::IsJson => "is_json",
            Self::IsSlug => "is_slug",
            Self::IsDivisibleBy(_) => "is_divisible_by",
        }
    }

    /// Default human-readable failure text, used when the chain carries no
    /// custom message for this check.
    #[must_use]
    pub fn default_message(&self) -> String {
        match self {
            Self::IsInt(_) => "Must be an integer".into(),
            Self::IsFloat(_) => "Must be a number".into(),
            Self::IsBoolean => "Must be a boolean".into(),
            Self::IsNumeric => "Must contain only digits".into(),
            Self::IsAlpha => "Must contain only letters".into(),
            Self::IsAlphanumeric => "Must contain only letters and numbers".into(),
            Self::IsAscii => "Must contain only ASCII characters".into(),
            Self::IsLowercase => "Must be lowercase".into(),
            Self::IsUppercase => "Must be uppercase".into(),
            Self::IsLength(range) => match (range.min, range.max) {
                (Some(min), Some(max)) => {
                    format!("Length must be between {min} and {max}")
                }
                (Some(min), None) => format!("Length must be at least {min}"),
                (None, Some(max)) => format!("Length must be at most {max}"),
                (None, None) => "Invalid length".into(),
            },
            Self::NotEmpty => "Must not be empty".into(),
            Self::Matches(pattern) => format!("Must match pattern '{pattern}'"),
            Self::IsIn(values) => format!("Must be one of: {}", values.join(", ")),
            Self::Contains(needle) => format!("Must contain '{needle}'"),
            Self::Equals(expected) => format!("Must equal '{expected}'"),
            Self::StartsWith(prefix) => format!("Must start with '{prefix}'"),
            Self::EndsWith(suffix) => format!("Must end with '{suffix}'"),
            Self::IsEmail => "Must be a valid email address".into(),
            Self::IsUrl => "Must be a valid URL".into(),
            Self::IsUuid => "Must be a valid UUID".into(),
            Self::IsIso8601 => "Must be a valid ISO 8601 date".into(),
            Self::IsIp => "Must be a valid IP address".into(),
            Self::IsIpv4 => "Must be a valid IPv4 address".into(),
            Self::IsIpv6 => "Must be a valid IPv6 address".into(),
            Self::IsPort => "Must be a valid port number".into(),
            Self::IsHostname => "Must be a valid hostname".into(),
            Self::IsMacAddress => "Must be a valid MAC address".into(),
            Self::IsHex => "Must be a hexadecimal string".into(),
            Self::IsBase64 => "Must be a Base64 string".into(),
            Self::IsJson => "Must be valid JSON".into(),
            Self::IsSlug => "Must be a URL-safe slug".into(),
            Self::IsDivisibleBy(n) => format!("Must be divisible by {n}"),
        }
    }
}
