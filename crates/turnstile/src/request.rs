//! The seam between chains and the web framework.
//!
//! The framework owns the per-request object; chains only need the three
//! read accessors and a mutable [`StateBag`] where executed fragments
//! accumulate. [`RequestParts`] is a plain concrete implementation for
//! embedding and tests; real frameworks implement [`ValidatedRequest`]
//! over their own request type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::report::ValidationReport;

// ============================================================================
// STATE BAG
// ============================================================================

/// A typed key-value bag scoped to one request.
///
/// Keys are types: one value per type, like `http::Extensions`. The
/// validation slot lives here under a private type, so it can never
/// collide with application entries.
#[derive(Default)]
pub struct StateBag {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl StateBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.entries
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|prev| prev.downcast().ok())
            .map(|boxed| *boxed)
    }

    #[must_use]
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref())
    }

    pub fn get_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_mut())
    }

    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.entries
            .remove(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast().ok())
            .map(|boxed| *boxed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for StateBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateBag").field("len", &self.len()).finish()
    }
}

// ============================================================================
// REQUEST TRAIT
// ============================================================================

/// What a chain needs from the framework's per-request object.
///
/// Path and query lookups are flat; only the parsed body supports
/// dot-notated field paths (resolved by the chain, not here). Query
/// parameters may repeat, hence the slice return.
pub trait ValidatedRequest {
    /// Flat path-parameter lookup.
    fn path_param(&self, name: &str) -> Option<&str>;

    /// Flat query-parameter lookup; `None` when the key is absent.
    fn query_values(&self, name: &str) -> Option<&[String]>;

    /// The parsed request body, if one was deserialized.
    fn body(&self) -> Option<&Value>;

    /// The request-scoped state bag.
    fn state(&self) -> &StateBag;

    /// Mutable access to the state bag.
    fn state_mut(&mut self) -> &mut StateBag;
}

// ============================================================================
// CONCRETE REQUEST
// ============================================================================

/// A standalone request representation.
///
/// Useful in tests and in glue code that already has path/query/body
/// pieces in hand.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use turnstile::RequestParts;
///
/// let req = RequestParts::new()
///     .with_path_param("id", "42")
///     .with_query_param("tag", "a")
///     .with_query_param("tag", "b")
///     .with_body(json!({"name": "alice"}));
/// ```
#[derive(Debug, Default)]
pub struct RequestParts {
    path: HashMap<String, String>,
    query: HashMap<String, Vec<String>>,
    body: Option<Value>,
    state: StateBag,
}

impl RequestParts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a path parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    /// Appends a query value; repeated calls with the same key build an array.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Sets the parsed body.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl ValidatedRequest for RequestParts {
    fn path_param(&self, name: &str) -> Option<&str> {
        self.path.get(name).map(String::as_str)
    }

    fn query_values(&self, name: &str) -> Option<&[String]> {
        self.query.get(name).map(Vec::as_slice)
    }

    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    fn state(&self) -> &StateBag {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateBag {
        &mut self.state
    }
}

// ============================================================================
// REQUEST-STATE BRIDGE
// ============================================================================

/// The private slot type holding fragments appended by executed chains.
#[derive(Debug, Default)]
struct ReportSlot(Vec<ValidationReport>);

/// Appends one executed chain's fragment into the request's slot,
/// creating the slot on first use.
pub fn append_report<R: ValidatedRequest + ?Sized>(req: &mut R, fragment: ValidationReport) {
    match req.state_mut().get_mut::<ReportSlot>() {
        Some(slot) => slot.0.push(fragment),
        None => {
            req.state_mut().insert(ReportSlot(vec![fragment]));
        }
    }
}

/// Merges every fragment accumulated so far into one report.
///
/// Idempotent: the slot is read, never cleared, so calling this twice
/// returns equal reports. An untouched request yields an empty report.
#[must_use]
pub fn collected<R: ValidatedRequest + ?Sized>(req: &R) -> ValidationReport {
    req.state()
        .get::<ReportSlot>()
        .map(|slot| ValidationReport::merge(slot.0.iter().cloned()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::report::FieldError;
    use crate::value::FieldValue;

    #[test]
    fn state_bag_is_typed() {
        #[derive(Debug, PartialEq)]
        struct Counter(u32);

        let mut bag = StateBag::new();
        assert!(bag.is_empty());
        assert_eq!(bag.insert(Counter(1)), None);
        assert_eq!(bag.insert(Counter(2)), Some(Counter(1)));
        assert_eq!(bag.get::<Counter>(), Some(&Counter(2)));
        if let Some(counter) = bag.get_mut::<Counter>() {
            counter.0 += 1;
        }
        assert_eq!(bag.remove::<Counter>(), Some(Counter(3)));
        assert_eq!(bag.get::<Counter>(), None);
    }

    #[test]
    fn collected_is_empty_without_appends() {
        let req = RequestParts::new();
        let report = collected(&req);
        assert!(!report.has_errors());
        assert!(report.fields().is_empty());
    }

    #[test]
    fn append_then_collect_merges_in_order() {
        let mut req = RequestParts::new();
        append_report(
            &mut req,
            ValidationReport::fragment("a", Some(FieldValue::Int(1)), Vec::new()),
        );
        append_report(
            &mut req,
            ValidationReport::fragment(
                "b",
                None,
                vec![FieldError {
                    field: "b".into(),
                    location: Location::Body,
                    message: "bad".into(),
                    value: "x".into(),
                }],
            ),
        );

        let report = collected(&req);
        assert_eq!(report.fields(), ["a", "b"]);
        assert!(report.has_errors());
        assert_eq!(report.errors().len(), 1);
    }

    #[test]
    fn collected_twice_is_equal_and_does_not_duplicate() {
        let mut req = RequestParts::new();
        append_report(
            &mut req,
            ValidationReport::fragment("a", Some(FieldValue::Int(1)), Vec::new()),
        );
        let first = collected(&req);
        let second = collected(&req);
        assert_eq!(first, second);
        assert_eq!(second.fields().len(), 1);
    }
}
