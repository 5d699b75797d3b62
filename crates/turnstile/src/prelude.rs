//! Prelude module for convenient imports.
//!
//! Provides a single `use turnstile::prelude::*;` import that brings in
//! the factories, the chain type, and everything a handler needs to read
//! results.
//!
//! # Examples
//!
//! ```rust,ignore
//! use turnstile::prelude::*;
//!
//! let chains = [
//!     param("id").is_uuid(),
//!     query("page").optional().is_int(IntRange::between(1, 1000)).to_int(),
//!     body("user.email").is_email().normalize_email(),
//! ];
//! ```

pub use crate::chain::{
    ChainError, CustomOutcome, Optionality, ValidationChain, body, param, query, run_chains,
};
pub use crate::checks::{CheckKind, FloatRange, IntRange, LengthRange};
pub use crate::location::Location;
pub use crate::message::{Message, MessageContext, computed};
pub use crate::report::{FieldError, ReportError, ValidationReport};
pub use crate::request::{RequestParts, StateBag, ValidatedRequest, append_report, collected};
pub use crate::sanitize::Sanitizer;
pub use crate::value::FieldValue;
