//! The working value a chain carries through its operations.
//!
//! A chain extracts one raw value per request, renders it to a string for
//! the built-in checks, and may replace it with a typed value when a
//! sanitizer runs (`to_int`, `to_date`, ...). [`FieldValue`] is that
//! carrier: it survives sanitation with its type intact so that
//! `passed_values` can hand the handler a `Date` where a `Date` was made.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

/// A field value at some point of a chain's execution.
///
/// Starts out as whatever was extracted from the request (strings for
/// path/query, any JSON shape for body fields) and is replaced in place
/// by sanitizers.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The JSON null marker (only reachable through body fields).
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Produced by the `to_date` sanitizer.
    Date(DateTime<FixedOffset>),
    /// A non-scalar body value (array or object), kept as parsed JSON.
    Json(Value),
}

impl FieldValue {
    /// Converts a parsed JSON value into a field value.
    ///
    /// Scalars unwrap into their typed variants; arrays and objects are
    /// kept as [`FieldValue::Json`].
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Json(value.clone())),
            Value::String(s) => Self::Str(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Json(value.clone()),
        }
    }

    /// Renders the value as the string the built-in checks run against.
    ///
    /// Null renders as the empty string (this is also what the
    /// missing-field placeholder stringifies to in error payloads).
    /// Arrays render as their comma-joined elements, matching how repeated
    /// query keys are reported.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::Date(d) => d.to_rfc3339(),
            Self::Json(Value::Array(items)) => items
                .iter()
                .map(render_json_item)
                .collect::<Vec<_>>()
                .join(","),
            Self::Json(v) => v.to_string(),
        }
    }

    /// Converts back to JSON for nested-object reconstruction.
    ///
    /// Dates serialize as RFC 3339 strings; a non-finite float collapses
    /// to null, the only lossy case.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Str(s) => Value::String(s.clone()),
            Self::Date(d) => Value::String(d.to_rfc3339()),
            Self::Json(v) => v.clone(),
        }
    }

    /// Returns the string content, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the parsed date, if a `to_date` sanitizer produced one.
    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// True for the JSON null marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

fn render_json_item(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolves a dot-separated path inside a parsed body.
///
/// Only object keys are addressed; there is no index syntax for arrays.
#[must_use]
pub(crate) fn lookup_path<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(body, |value, key| value.get(key))
}
