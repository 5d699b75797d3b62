//! Custom error messages for chain checks.
//!
//! A message attached with `with_message` is either a literal string or a
//! closure computed at failure time from a [`MessageContext`] (the field,
//! its location, the raw value as reported, and the request's state bag).

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::location::Location;
use crate::request::StateBag;

/// Everything a computed message may look at.
#[derive(Debug)]
pub struct MessageContext<'a> {
    /// The chain's field name.
    pub field: &'a str,
    /// The chain's location.
    pub location: Location,
    /// The raw value as it will appear in the error (missing fields and
    /// nulls render as the empty string).
    pub raw_value: &'a str,
    /// The request's mutable state bag, read-only here.
    pub state: &'a StateBag,
}

/// A configured error message: literal text or a computed closure.
#[derive(Clone)]
pub enum Message {
    Text(Cow<'static, str>),
    Computed(Arc<dyn Fn(&MessageContext<'_>) -> String + Send + Sync>),
}

impl Message {
    /// Resolves to the final user-facing text.
    #[must_use]
    pub fn resolve(&self, cx: &MessageContext<'_>) -> String {
        match self {
            Self::Text(text) => text.clone().into_owned(),
            Self::Computed(f) => f(cx),
        }
    }
}

/// Builds a computed message from a closure.
pub fn computed<F>(f: F) -> Message
where
    F: Fn(&MessageContext<'_>) -> String + Send + Sync + 'static,
{
    Message::Computed(Arc::new(f))
}

impl From<&'static str> for Message {
    fn from(text: &'static str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
