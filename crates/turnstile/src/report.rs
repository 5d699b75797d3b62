//! Validation results: per-field findings and the merged report.
//!
//! A [`ValidationReport`] is three parallel structures: the field names a
//! chain (or several merged chains) covered, one final-value slot per
//! field (`None` when the field failed), and the accumulated errors.
//! Reports are immutable once built; merging concatenates all three
//! structures preserving relative order, which is how per-chain fragments
//! become one request-level result.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::location::Location;
use crate::value::FieldValue;

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// The chain's field name (dot-notated for nested body fields).
    pub field: String,
    /// Where the value was read from.
    pub location: Location,
    /// Human-readable message, already resolved.
    pub message: String,
    /// The raw pre-sanitation value, rendered as a string. Missing fields
    /// and explicit nulls render as the empty string.
    pub value: String,
}

/// Raised when a report is built from mismatched parallel lists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("field list has {fields} entries but value list has {values}")]
    LengthMismatch { fields: usize, values: usize },
}

/// The merged outcome of zero or more executed chains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    fields: Vec<String>,
    values: Vec<Option<FieldValue>>,
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// An empty report: no fields, no errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-field fragment, as produced by one chain execution.
    #[must_use]
    pub fn fragment(
        field: impl Into<String>,
        value: Option<FieldValue>,
        errors: Vec<FieldError>,
    ) -> Self {
        Self {
            fields: vec![field.into()],
            values: vec![value],
            errors,
        }
    }

    /// Builds a report from already-parallel lists.
    pub fn from_parts(
        fields: Vec<String>,
        values: Vec<Option<FieldValue>>,
        errors: Vec<FieldError>,
    ) -> Result<Self, ReportError> {
        if fields.len() != values.len() {
            return Err(ReportError::LengthMismatch {
                fields: fields.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            fields,
            values,
            errors,
        })
    }

    /// Concatenates any number of reports, preserving relative order.
    ///
    /// Associative: `merge([merge([a, b]), c])` equals `merge([a, b, c])`.
    #[must_use]
    pub fn merge<I>(reports: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut merged = Self::new();
        for report in reports {
            merged.fields.extend(report.fields);
            merged.values.extend(report.values);
            merged.errors.extend(report.errors);
        }
        merged
    }

    /// True iff any chain recorded an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All findings, in accumulation order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// One finding per field name, last write wins.
    ///
    /// When several merged chains target the same field, the later
    /// chain's error replaces the earlier one in this view only;
    /// [`Self::errors`] still contains both. Insertion order of first
    /// appearance is preserved.
    #[must_use]
    pub fn by_field(&self) -> IndexMap<String, FieldError> {
        let mut map = IndexMap::new();
        for error in &self.errors {
            map.insert(error.field.clone(), error.clone());
        }
        map
    }

    /// The covered field names, one per slot.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The final value recorded for a field, if it passed.
    ///
    /// When merged chains share a field name, the last passing slot wins,
    /// consistent with [`Self::passed_json`].
    #[must_use]
    pub fn value_of(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .zip(&self.values)
            .rev()
            .find_map(|(f, v)| (f == field).then_some(v.as_ref()).flatten())
    }

    /// Reconstructs a nested JSON object from every passing field.
    ///
    /// Dot-notated field names become nested object keys: a passing field
    /// `address.street` yields `{"address": {"street": ...}}`. Failed
    /// fields are omitted entirely.
    #[must_use]
    pub fn passed_json(&self) -> Value {
        let mut root = Map::new();
        for (field, value) in self.fields.iter().zip(&self.values) {
            if let Some(value) = value {
                insert_path(&mut root, field, value.to_json());
            }
        }
        Value::Object(root)
    }

    /// Deserializes the reconstructed object into a caller-chosen shape.
    ///
    /// No shape validation happens here beyond what serde enforces; that
    /// is the caller's contract, as with any typed extraction.
    pub fn passed_values<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.passed_json())
    }
}

/// Inserts `value` at a dot-separated path, creating intermediate objects
/// and overwriting non-object intermediates when the path demands it.
fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut current = root;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else { return };
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn err(field: &str, message: &str) -> FieldError {
        FieldError {
            field: field.into(),
            location: Location::Body,
            message: message.into(),
            value: String::new(),
        }
    }

    #[test]
    fn from_parts_rejects_mismatched_lengths() {
        let result = ValidationReport::from_parts(
            vec!["a".into()],
            vec![None, None],
            Vec::new(),
        );
        assert_eq!(
            result.unwrap_err(),
            ReportError::LengthMismatch {
                fields: 1,
                values: 2
            }
        );
    }

    #[test]
    fn merge_concatenates_in_order() {
        let a = ValidationReport::fragment("a", Some(FieldValue::Int(1)), vec![err("a", "x")]);
        let b = ValidationReport::fragment("b", None, vec![err("b", "y")]);
        let merged = ValidationReport::merge([a, b]);

        assert_eq!(merged.fields(), ["a", "b"]);
        let messages: Vec<_> = merged.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["x", "y"]);
    }

    #[test]
    fn by_field_is_last_write_wins_but_errors_keeps_both() {
        let a = ValidationReport::fragment("name", None, vec![err("name", "first")]);
        let b = ValidationReport::fragment("name", None, vec![err("name", "second")]);
        let merged = ValidationReport::merge([a, b]);

        assert_eq!(merged.errors().len(), 2);
        let by_field = merged.by_field();
        assert_eq!(by_field.len(), 1);
        assert_eq!(by_field["name"].message, "second");
    }

    #[test]
    fn passed_json_expands_dot_paths() {
        let report = ValidationReport::merge([
            ValidationReport::fragment(
                "address.street",
                Some(FieldValue::Str("Main St".into())),
                Vec::new(),
            ),
            ValidationReport::fragment(
                "address.zip",
                Some(FieldValue::Str("12345".into())),
                Vec::new(),
            ),
            ValidationReport::fragment("name", Some(FieldValue::Str("alice".into())), Vec::new()),
            ValidationReport::fragment("age", None, vec![err("age", "bad")]),
        ]);

        assert_eq!(
            report.passed_json(),
            json!({
                "address": {"street": "Main St", "zip": "12345"},
                "name": "alice",
            })
        );
    }

    #[test]
    fn passed_values_deserializes_into_typed_shape() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Address {
            street: String,
        }
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Form {
            address: Address,
        }

        let report = ValidationReport::fragment(
            "address.street",
            Some(FieldValue::Str("Main St".into())),
            Vec::new(),
        );
        let form: Form = report.passed_values().unwrap();
        assert_eq!(
            form,
            Form {
                address: Address {
                    street: "Main St".into()
                }
            }
        );
    }

    #[test]
    fn scalar_then_nested_path_coerces_to_object() {
        let report = ValidationReport::merge([
            ValidationReport::fragment("a", Some(FieldValue::Int(1)), Vec::new()),
            ValidationReport::fragment("a.b", Some(FieldValue::Int(2)), Vec::new()),
        ]);
        assert_eq!(report.passed_json(), json!({"a": {"b": 2}}));
    }

    #[test]
    fn value_of_distinguishes_failed_from_absent() {
        let report = ValidationReport::merge([
            ValidationReport::fragment("ok", Some(FieldValue::Bool(true)), Vec::new()),
            ValidationReport::fragment("failed", None, vec![err("failed", "no")]),
        ]);
        assert_eq!(report.value_of("ok"), Some(&FieldValue::Bool(true)));
        assert_eq!(report.value_of("failed"), None);
        assert_eq!(report.value_of("never-ran"), None);
    }
}
