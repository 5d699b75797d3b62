//! Request locations a chain can read from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a field's raw value lives on the incoming request.
///
/// This is a closed set: a chain is bound to exactly one location at
/// construction time, and the location decides which request accessor
/// the executor reads from. Only [`Location::Body`] supports dot-notated
/// field names; path and query lookups are flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// A route/path parameter (e.g. `/users/{id}`).
    Path,
    /// A query-string parameter. Repeated keys surface as arrays.
    Query,
    /// A field of the parsed request body.
    Body,
}

impl Location {
    /// Stable lowercase name, used in error payloads and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
