//! # turnstile
//!
//! Declarative per-field request validation and sanitation chains.
//!
//! A service declares one [`ValidationChain`] per field, bound to a
//! request location by the [`param`], [`query`] and [`body`] factories,
//! and runs the chains as middleware steps ahead of its handler. Each
//! execution appends a result fragment into the request's state bag; the
//! handler calls [`collected`] once to get the merged
//! [`ValidationReport`].
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use turnstile::{IntRange, RequestParts, body, collected, query};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let chains = [
//!     query("name").trim().not_empty().with_message("Name is required"),
//!     body("count").is_int(IntRange::between(1, 100)).to_int(),
//! ];
//!
//! let mut req = RequestParts::new()
//!     .with_query_param("name", "  alice  ")
//!     .with_body(json!({"count": "42"}));
//!
//! for chain in &chains {
//!     chain.run(&mut req).await;
//! }
//!
//! let report = collected(&req);
//! assert!(!report.has_errors());
//! assert_eq!(report.passed_json(), json!({"name": "alice", "count": 42}));
//! # }
//! ```
//!
//! ## Error model
//!
//! Validation findings are plain data ([`FieldError`]), accumulated and
//! handed to the handler; they never interrupt the pipeline. Chain
//! misuse (a message with no validator to attach to, a second sanitizer)
//! is a programming mistake and panics at the offending builder call —
//! see [`ChainError`].

pub mod chain;
pub mod checks;
pub mod location;
pub mod message;
pub mod prelude;
pub mod report;
pub mod request;
pub mod sanitize;
pub mod value;

pub use chain::{
    ChainError, CustomOutcome, Optionality, ValidationChain, body, param, query, run_chains,
};
pub use checks::{CheckKind, FloatRange, IntRange, LengthRange};
pub use location::Location;
pub use message::{Message, MessageContext, computed};
pub use report::{FieldError, ReportError, ValidationReport};
pub use request::{RequestParts, StateBag, ValidatedRequest, append_report, collected};
pub use sanitize::Sanitizer;
pub use value::FieldValue;
