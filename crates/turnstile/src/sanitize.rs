//! The closed set of sanitation transforms.
//!
//! A chain may carry at most one sanitizer; it runs only after every
//! earlier check has been evaluated and only if no error has accumulated,
//! replacing the working value in place. Conversions that fail (`to_int`
//! on "abc", `to_date` on garbage) yield [`FieldValue::Null`] rather than
//! an error: sanitizers transform, they never judge.

use crate::checks::format::parse_iso8601;
use crate::value::FieldValue;

/// One sanitation transform, with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Sanitizer {
    /// Strip leading and trailing characters (whitespace by default).
    Trim { chars: Option<String> },
    /// Strip leading characters only.
    LTrim { chars: Option<String> },
    /// Strip trailing characters only.
    RTrim { chars: Option<String> },
    /// Replace `&`, `<`, `>`, `"`, `'` and `/` with HTML entities.
    Escape,
    /// Reverse of [`Sanitizer::Escape`].
    Unescape,
    /// Parse as `i64`; null on failure.
    ToInt,
    /// Parse as `f64`; null on failure.
    ToFloat,
    /// Coerce to a boolean. In strict mode only `"true"` and `"1"` are
    /// true; otherwise everything except `""`, `"0"` and `"false"` is.
    ToBoolean { strict: bool },
    /// Parse as ISO 8601; null on failure.
    ToDate,
    /// Trim and lowercase an email address.
    NormalizeEmail,
    /// Keep only the listed characters.
    Whitelist { chars: String },
    /// Remove the listed characters.
    Blacklist { chars: String },
    /// Remove ASCII control characters, optionally keeping `\n` and `\r`.
    StripLow { keep_newlines: bool },
}

impl Sanitizer {
    /// Applies the transform to the current working value.
    #[must_use]
    pub fn apply(&self, value: &FieldValue) -> FieldValue {
        let input = value.render();
        match self {
            Self::Trim { chars } => FieldValue::Str(trim_with(&input, chars.as_deref(), true, true)),
            Self::LTrim { chars } => {
                FieldValue::Str(trim_with(&input, chars.as_deref(), true, false))
            }
            Self::RTrim { chars } => {
                FieldValue::Str(trim_with(&input, chars.as_deref(), false, true))
            }
            Self::Escape => FieldValue::Str(escape(&input)),
            Self::Unescape => FieldValue::Str(unescape(&input)),
            Self::ToInt => input
                .parse::<i64>()
                .map_or(FieldValue::Null, FieldValue::Int),
            Self::ToFloat => input
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map_or(FieldValue::Null, FieldValue::Float),
            Self::ToBoolean { strict } => FieldValue::Bool(if *strict {
                matches!(input.as_str(), "true" | "1")
            } else {
                !matches!(input.as_str(), "" | "0" | "false")
            }),
            Self::ToDate => parse_iso8601(&input).map_or(FieldValue::Null, FieldValue::Date),
            Self::NormalizeEmail => FieldValue::Str(input.trim().to_lowercase()),
            Self::Whitelist { chars } => {
                FieldValue::Str(input.chars().filter(|c| chars.contains(*c)).collect())
            }
            Self::Blacklist { chars } => {
                FieldValue::Str(input.chars().filter(|c| !chars.contains(*c)).collect())
            }
            Self::StripLow { keep_newlines } => FieldValue::Str(
                input
                    .chars()
                    .filter(|&c| {
                        let low = (c as u32) < 0x20 || c as u32 == 0x7F;
                        !low || (*keep_newlines && (c == '\n' || c == '\r'))
                    })
                    .collect(),
            ),
        }
    }

    /// Stable snake_case name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Trim { .. } => "trim",
            Self::LTrim { .. } => "ltrim",
            Self::RTrim { .. } => "rtrim",
            Self::Escape => "escape",
            Self::Unescape => "unescape",
            Self::ToInt => "to_int",
            Self::ToFloat => "to_float",
            Self::ToBoolean { .. } => "to_boolean",
            Self::ToDate => "to_date",
            Self::NormalizeEmail => "normalize_email",
            Self::Whitelist { .. } => "whitelist",
            Self::Blacklist { .. } => "blacklist",
            Self::StripLow { .. } => "strip_low",
        }
    }
}

fn trim_with(input: &str, chars: Option<&str>, left: bool, right: bool) -> String {
    let in_set = |c: char| chars.map_or_else(|| c.is_whitespace(), |set| set.contains(c));
    let mut s = input;
    if left {
        s = s.trim_start_matches(&in_set);
    }
    if right {
        s = s.trim_end_matches(&in_set);
    }
    s.to_string()
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> FieldValue {
        FieldValue::Str(v.to_string())
    }

    #[test]
    fn trim_variants() {
        assert_eq!(Sanitizer::Trim { chars: None }.apply(&s("  hi  ")), s("hi"));
        assert_eq!(Sanitizer::LTrim { chars: None }.apply(&s("  hi  ")), s("hi  "));
        assert_eq!(Sanitizer::RTrim { chars: None }.apply(&s("  hi  ")), s("  hi"));
        assert_eq!(
            Sanitizer::Trim {
                chars: Some("-".into())
            }
            .apply(&s("--hi--")),
            s("hi")
        );
    }

    #[test]
    fn escape_round_trip() {
        let raw = s(r#"<a href="/x">Tom & Jerry's</a>"#);
        let escaped = Sanitizer::Escape.apply(&raw);
        assert_eq!(
            escaped,
            s("&lt;a href=&quot;&#x2F;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;&#x2F;a&gt;")
        );
        assert_eq!(Sanitizer::Unescape.apply(&escaped), raw);
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(Sanitizer::ToInt.apply(&s("42")), FieldValue::Int(42));
        assert_eq!(Sanitizer::ToInt.apply(&s("abc")), FieldValue::Null);
        assert_eq!(Sanitizer::ToFloat.apply(&s("1.5")), FieldValue::Float(1.5));
        assert_eq!(Sanitizer::ToFloat.apply(&s("nope")), FieldValue::Null);
    }

    #[test]
    fn boolean_coercion() {
        let lax = Sanitizer::ToBoolean { strict: false };
        assert_eq!(lax.apply(&s("anything")), FieldValue::Bool(true));
        assert_eq!(lax.apply(&s("0")), FieldValue::Bool(false));
        assert_eq!(lax.apply(&s("false")), FieldValue::Bool(false));
        assert_eq!(lax.apply(&s("")), FieldValue::Bool(false));

        let strict = Sanitizer::ToBoolean { strict: true };
        assert_eq!(strict.apply(&s("true")), FieldValue::Bool(true));
        assert_eq!(strict.apply(&s("1")), FieldValue::Bool(true));
        assert_eq!(strict.apply(&s("anything")), FieldValue::Bool(false));
    }

    #[test]
    fn date_conversion() {
        let out = Sanitizer::ToDate.apply(&s("2024-06-01T12:00:00Z"));
        assert!(out.as_date().is_some());
        assert_eq!(Sanitizer::ToDate.apply(&s("junk")), FieldValue::Null);
    }

    #[test]
    fn email_normalization() {
        assert_eq!(
            Sanitizer::NormalizeEmail.apply(&s("  User@Example.COM ")),
            s("user@example.com")
        );
    }

    #[test]
    fn charset_filters() {
        assert_eq!(
            Sanitizer::Whitelist {
                chars: "0123456789".into()
            }
            .apply(&s("a1b2c3")),
            s("123")
        );
        assert_eq!(
            Sanitizer::Blacklist {
                chars: "abc".into()
            }
            .apply(&s("a1b2c3")),
            s("123")
        );
    }

    #[test]
    fn strip_low() {
        let dirty = s("li\x01ne1\nline2\x7F");
        assert_eq!(
            Sanitizer::StripLow {
                keep_newlines: false
            }
            .apply(&dirty),
            s("line1line2")
        );
        assert_eq!(
            Sanitizer::StripLow {
                keep_newlines: true
            }
            .apply(&dirty),
            s("line1\nline2")
        );
    }
}
