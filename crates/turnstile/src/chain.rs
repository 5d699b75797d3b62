//! The rule chain: a single field's validation and sanitation pipeline.
//!
//! A [`ValidationChain`] is built once through its fluent methods, wired
//! as a middleware step, and then executed against many independent
//! requests; per-request results never live on the chain. Execution walks
//! the operations in declaration order, carries a working [`FieldValue`],
//! accumulates [`FieldError`]s, and appends the resulting fragment into
//! the request's validation slot.
//!
//! Chain misuse (a message with nothing to attach to, a second sanitizer)
//! is a programming mistake, not bad input: those methods panic at the
//! offending call site instead of deferring to execution time.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use thiserror::Error;

use crate::checks::{CheckKind, FloatRange, IntRange, LengthRange};
use crate::location::Location;
use crate::message::{Message, MessageContext};
use crate::report::{FieldError, ValidationReport};
use crate::request::{ValidatedRequest, append_report, collected};
use crate::sanitize::Sanitizer;
use crate::value::{FieldValue, lookup_path};

/// Default text for a named-check failure with no configured message.
const INVALID_VALUE: &str = "Invalid value";

/// Text for the required-but-missing finding.
const MISSING_VALUE: &str = "Missing value";

/// Outcome of a custom async predicate: `Err` carries the failure text.
///
/// The text is the fallback tier of the message priority chain, so it may
/// reach users verbatim; predicates should only return messages they are
/// willing to expose, or the chain should configure `with_message`.
pub type CustomOutcome = Result<(), Cow<'static, str>>;

type CustomFn = Arc<dyn Fn(FieldValue) -> BoxFuture<'static, CustomOutcome> + Send + Sync>;

/// Chain configuration mistakes. Always raised synchronously, as panics,
/// at the offending builder call.
#[derive(Debug, Error, PartialEq)]
pub enum ChainError {
    #[error("with_message called on an empty chain for field `{0}`")]
    MessageWithoutOperation(String),
    #[error("with_message must follow a validator, not a sanitizer (field `{0}`)")]
    MessageOnSanitizer(String),
    #[error("chain for field `{0}` already declares a sanitizer; only one is allowed")]
    SecondSanitizer(String),
    #[error("invalid regex for field `{field}`: {source}")]
    InvalidRegex {
        field: String,
        #[source]
        source: regex::Error,
    },
}

/// Per-chain optionality, set by [`ValidationChain::optional`] and
/// [`ValidationChain::optional_nullable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Optionality {
    /// Whether an explicit null is accepted without running any checks.
    pub allow_null: bool,
}

#[derive(Clone)]
enum Operation {
    Check {
        kind: CheckKind,
        message: Option<Message>,
    },
    Custom {
        predicate: CustomFn,
        message: Option<Message>,
    },
    Sanitize(Sanitizer),
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check { kind, message } => f
                .debug_struct("Check")
                .field("kind", kind)
                .field("message", message)
                .finish(),
            Self::Custom { message, .. } => f
                .debug_struct("Custom")
                .field("predicate", &"..")
                .field("message", message)
                .finish(),
            Self::Sanitize(sanitizer) => f.debug_tuple("Sanitize").field(sanitizer).finish(),
        }
    }
}

// ============================================================================
// FACTORIES
// ============================================================================

/// A chain reading a path parameter. Lookup is flat; dots in `name` are
/// not interpreted.
#[must_use]
pub fn param(name: impl Into<String>) -> ValidationChain {
    ValidationChain::new(name, Location::Path)
}

/// A chain reading a query parameter. Lookup is flat; repeated keys
/// render comma-joined for the built-in checks.
#[must_use]
pub fn query(name: impl Into<String>) -> ValidationChain {
    ValidationChain::new(name, Location::Query)
}

/// A chain reading a body field. `name` may be dot-notated to address a
/// nested property, and the same path shapes the reconstructed output of
/// [`ValidationReport::passed_json`].
#[must_use]
pub fn body(name: impl Into<String>) -> ValidationChain {
    ValidationChain::new(name, Location::Body)
}

// ============================================================================
// CHAIN
// ============================================================================

/// A single field's declarative validation + sanitation pipeline.
///
/// # Examples
///
/// ```
/// use turnstile::{LengthRange, query};
///
/// let name = query("name")
///     .trim()
///     .is_length(LengthRange::between(3, 20))
///     .with_message("Name must be 3-20 characters");
/// ```
#[derive(Debug, Clone)]
pub struct ValidationChain {
    field: String,
    location: Location,
    ops: Vec<Operation>,
    optional: Option<Optionality>,
}

impl ValidationChain {
    /// Creates an empty required chain bound to a field and location.
    #[must_use]
    pub fn new(field: impl Into<String>, location: Location) -> Self {
        Self {
            field: field.into(),
            location,
            ops: Vec::new(),
            optional: None,
        }
    }

    /// The field name this chain is bound to.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The request location this chain reads from.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Whether the field may be absent without producing an error.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional.is_some()
    }

    // ------------------------------------------------------------------
    // Core configuration
    // ------------------------------------------------------------------

    /// Appends a named check. Records intent only; nothing runs until
    /// [`Self::run`].
    #[must_use = "builder methods must be chained or built"]
    pub fn add_check(mut self, kind: CheckKind) -> Self {
        self.ops.push(Operation::Check {
            kind,
            message: None,
        });
        self
    }

    /// Attaches a custom message to the most recently added validator.
    ///
    /// Accepts literal text (`&'static str` / `String`) or a computed
    /// [`Message`] built with [`crate::message::computed`].
    ///
    /// # Panics
    ///
    /// Panics with [`ChainError::MessageWithoutOperation`] on an empty
    /// chain, and with [`ChainError::MessageOnSanitizer`] when the last
    /// operation is a sanitizer; a message only makes sense on the
    /// immediately preceding validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        match self.ops.last_mut() {
            None => panic!("{}", ChainError::MessageWithoutOperation(self.field)),
            Some(Operation::Sanitize(_)) => {
                panic!("{}", ChainError::MessageOnSanitizer(self.field))
            }
            Some(Operation::Check { message: slot, .. } | Operation::Custom { message: slot, .. }) => {
                *slot = Some(message.into());
            }
        }
        self
    }

    /// Marks the field as optional: an absent field is skipped entirely
    /// (no fragment, no error). An explicit null still runs the checks.
    /// Later optionality calls overwrite earlier ones.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        self.optional = Some(Optionality { allow_null: false });
        self
    }

    /// Like [`Self::optional`], but an explicit null is also accepted
    /// without running any checks.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional_nullable(mut self) -> Self {
        self.optional = Some(Optionality { allow_null: true });
        self
    }

    /// Appends a custom async predicate.
    ///
    /// The predicate receives the current working value (post any earlier
    /// sanitation) and returns `Err(text)` to fail validation. Message
    /// priority on failure: `with_message` if configured, then the
    /// returned text, then a fixed default.
    #[must_use = "builder methods must be chained or built"]
    pub fn custom<F, Fut>(mut self, predicate: F) -> Self
    where
        F: Fn(FieldValue) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CustomOutcome> + Send + 'static,
    {
        let predicate: CustomFn = Arc::new(move |value| predicate(value).boxed());
        self.ops.push(Operation::Custom {
            predicate,
            message: None,
        });
        self
    }

    fn add_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        let already = self
            .ops
            .iter()
            .any(|op| matches!(op, Operation::Sanitize(_)));
        assert!(
            !already,
            "{}",
            ChainError::SecondSanitizer(self.field.clone())
        );
        self.ops.push(Operation::Sanitize(sanitizer));
        self
    }

    // ------------------------------------------------------------------
    // Named checks (thin wrappers over add_check)
    // ------------------------------------------------------------------

    #[must_use = "builder methods must be chained or built"]
    pub fn is_int(self, range: IntRange) -> Self {
        self.add_check(CheckKind::IsInt(range))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_float(self, range: FloatRange) -> Self {
        self.add_check(CheckKind::IsFloat(range))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_boolean(self) -> Self {
        self.add_check(CheckKind::IsBoolean)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_numeric(self) -> Self {
        self.add_check(CheckKind::IsNumeric)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_alpha(self) -> Self {
        self.add_check(CheckKind::IsAlpha)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_alphanumeric(self) -> Self {
        self.add_check(CheckKind::IsAlphanumeric)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_ascii(self) -> Self {
        self.add_check(CheckKind::IsAscii)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_lowercase(self) -> Self {
        self.add_check(CheckKind::IsLowercase)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_uppercase(self) -> Self {
        self.add_check(CheckKind::IsUppercase)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_length(self, range: LengthRange) -> Self {
        self.add_check(CheckKind::IsLength(range))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn not_empty(self) -> Self {
        self.add_check(CheckKind::NotEmpty)
    }

    /// # Panics
    ///
    /// Panics with [`ChainError::InvalidRegex`] when `pattern` does not
    /// compile; a broken pattern is a configuration mistake.
    #[must_use = "builder methods must be chained or built"]
    pub fn matches(self, pattern: &str) -> Self {
        match regex::Regex::new(pattern) {
            Ok(re) => self.add_check(CheckKind::Matches(re)),
            Err(source) => panic!(
                "{}",
                ChainError::InvalidRegex {
                    field: self.field,
                    source,
                }
            ),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_in<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_check(CheckKind::IsIn(values.into_iter().map(Into::into).collect()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn contains(self, needle: impl Into<String>) -> Self {
        self.add_check(CheckKind::Contains(needle.into()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn equals(self, expected: impl Into<String>) -> Self {
        self.add_check(CheckKind::Equals(expected.into()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        self.add_check(CheckKind::StartsWith(prefix.into()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        self.add_check(CheckKind::EndsWith(suffix.into()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_email(self) -> Self {
        self.add_check(CheckKind::IsEmail)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_url(self) -> Self {
        self.add_check(CheckKind::IsUrl)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_uuid(self) -> Self {
        self.add_check(CheckKind::IsUuid)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_iso8601(self) -> Self {
        self.add_check(CheckKind::IsIso8601)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_ip(self) -> Self {
        self.add_check(CheckKind::IsIp)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_ipv4(self) -> Self {
        self.add_check(CheckKind::IsIpv4)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_ipv6(self) -> Self {
        self.add_check(CheckKind::IsIpv6)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_port(self) -> Self {
        self.add_check(CheckKind::IsPort)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_hostname(self) -> Self {
        self.add_check(CheckKind::IsHostname)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_mac_address(self) -> Self {
        self.add_check(CheckKind::IsMacAddress)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_hex(self) -> Self {
        self.add_check(CheckKind::IsHex)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_base64(self) -> Self {
        self.add_check(CheckKind::IsBase64)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_json(self) -> Self {
        self.add_check(CheckKind::IsJson)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_slug(self) -> Self {
        self.add_check(CheckKind::IsSlug)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is_divisible_by(self, n: i64) -> Self {
        self.add_check(CheckKind::IsDivisibleBy(n))
    }

    // ------------------------------------------------------------------
    // Sanitizers (thin wrappers; at most one per chain)
    // ------------------------------------------------------------------

    /// # Panics
    ///
    /// Every sanitizer method panics with [`ChainError::SecondSanitizer`]
    /// when the chain already declares one; a single transform keeps the
    /// ordering of sanitation unambiguous.
    #[must_use = "builder methods must be chained or built"]
    pub fn trim(self) -> Self {
        self.add_sanitizer(Sanitizer::Trim { chars: None })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn trim_chars(self, chars: impl Into<String>) -> Self {
        self.add_sanitizer(Sanitizer::Trim {
            chars: Some(chars.into()),
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn ltrim(self) -> Self {
        self.add_sanitizer(Sanitizer::LTrim { chars: None })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn rtrim(self) -> Self {
        self.add_sanitizer(Sanitizer::RTrim { chars: None })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn escape(self) -> Self {
        self.add_sanitizer(Sanitizer::Escape)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn unescape(self) -> Self {
        self.add_sanitizer(Sanitizer::Unescape)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn to_int(self) -> Self {
        self.add_sanitizer(Sanitizer::ToInt)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn to_float(self) -> Self {
        self.add_sanitizer(Sanitizer::ToFloat)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn to_boolean(self, strict: bool) -> Self {
        self.add_sanitizer(Sanitizer::ToBoolean { strict })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn to_date(self) -> Self {
        self.add_sanitizer(Sanitizer::ToDate)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn normalize_email(self) -> Self {
        self.add_sanitizer(Sanitizer::NormalizeEmail)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn whitelist(self, chars: impl Into<String>) -> Self {
        self.add_sanitizer(Sanitizer::Whitelist {
            chars: chars.into(),
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn blacklist(self, chars: impl Into<String>) -> Self {
        self.add_sanitizer(Sanitizer::Blacklist {
            chars: chars.into(),
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn strip_low(self, keep_newlines: bool) -> Self {
        self.add_sanitizer(Sanitizer::StripLow { keep_newlines })
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Executes the chain against one request.
    ///
    /// Appends the produced fragment into the request's validation slot
    /// and returns a copy; returns `None` when the field was skipped
    /// (absent and optional, or null and nullable).
    ///
    /// A required field that is absent short-circuits to exactly one
    /// "Missing value" finding without running any operation; the first
    /// validator's configured message, if any, replaces the default text.
    pub async fn run<R>(&self, req: &mut R) -> Option<ValidationReport>
    where
        R: ValidatedRequest + ?Sized,
    {
        let extracted = self.extract(req);

        let Some(original) = extracted else {
            if self.optional.is_some() {
                tracing::trace!(field = %self.field, location = %self.location, "optional field absent, skipped");
                return None;
            }
            let fragment = self.missing_fragment(req);
            append_report(req, fragment.clone());
            return Some(fragment);
        };

        if original.is_null() && self.optional.is_some_and(|opt| opt.allow_null) {
            tracing::trace!(field = %self.field, location = %self.location, "null accepted, skipped");
            return None;
        }

        let raw_rendered = original.render();
        let mut working = original;
        let mut errors: Vec<FieldError> = Vec::new();

        for op in &self.ops {
            match op {
                Operation::Sanitize(sanitizer) => {
                    // Never sanitize data that already failed validation.
                    if errors.is_empty() {
                        working = sanitizer.apply(&working);
                    } else {
                        tracing::trace!(
                            field = %self.field,
                            sanitizer = sanitizer.name(),
                            "skipping sanitizer after failed checks"
                        );
                    }
                }
                Operation::Check { kind, message } => {
                    if !kind.run(&working.render()) {
                        tracing::trace!(field = %self.field, check = kind.name(), "check failed");
                        let text = self.resolve_message(
                            req,
                            message.as_ref(),
                            &raw_rendered,
                            || kind.default_message(),
                        );
                        errors.push(self.field_error(text, &raw_rendered));
                    }
                }
                Operation::Custom { predicate, message } => {
                    if let Err(rejection) = predicate(working.clone()).await {
                        let text = self.resolve_message(
                            req,
                            message.as_ref(),
                            &raw_rendered,
                            || {
                                if rejection.is_empty() {
                                    INVALID_VALUE.to_string()
                                } else {
                                    rejection.into_owned()
                                }
                            },
                        );
                        errors.push(self.field_error(text, &raw_rendered));
                    }
                }
            }
        }

        tracing::debug!(
            field = %self.field,
            location = %self.location,
            errors = errors.len(),
            "chain executed"
        );

        let value = errors.is_empty().then_some(working);
        let fragment = ValidationReport::fragment(self.field.clone(), value, errors);
        append_report(req, fragment.clone());
        Some(fragment)
    }

    /// Reads the raw value for this chain's field, or `None` when absent.
    fn extract<R>(&self, req: &R) -> Option<FieldValue>
    where
        R: ValidatedRequest + ?Sized,
    {
        match self.location {
            Location::Path => req
                .path_param(&self.field)
                .map(|v| FieldValue::Str(v.to_string())),
            Location::Query => {
                let values = req.query_values(&self.field)?;
                match values {
                    [] => None,
                    [single] => Some(FieldValue::Str(single.clone())),
                    many => Some(FieldValue::Json(serde_json::Value::from(many.to_vec()))),
                }
            }
            Location::Body => {
                let body = req.body()?;
                lookup_path(body, &self.field).map(FieldValue::from_json)
            }
        }
    }

    /// The short-circuit fragment for a required field that is absent.
    fn missing_fragment<R>(&self, req: &R) -> ValidationReport
    where
        R: ValidatedRequest + ?Sized,
    {
        let configured = self.ops.iter().find_map(|op| match op {
            Operation::Check { message, .. } | Operation::Custom { message, .. } => {
                message.as_ref()
            }
            Operation::Sanitize(_) => None,
        });
        let text = self.resolve_message(req, configured, "", || MISSING_VALUE.to_string());
        ValidationReport::fragment(
            self.field.clone(),
            None,
            vec![self.field_error(text, "")],
        )
    }

    fn resolve_message<R, D>(
        &self,
        req: &R,
        configured: Option<&Message>,
        raw_value: &str,
        default: D,
    ) -> String
    where
        R: ValidatedRequest + ?Sized,
        D: FnOnce() -> String,
    {
        match configured {
            Some(message) => message.resolve(&MessageContext {
                field: &self.field,
                location: self.location,
                raw_value,
                state: req.state(),
            }),
            None => default(),
        }
    }

    fn field_error(&self, message: String, raw_value: &str) -> FieldError {
        FieldError {
            field: self.field.clone(),
            location: self.location,
            message,
            value: raw_value.to_string(),
        }
    }
}

/// Runs a route's chains in registration order, then merges the slot.
///
/// Later chains observe the slot state left by earlier ones, so the
/// returned report is exactly what a handler calling
/// [`crate::collected`] afterwards would see.
pub async fn run_chains<R>(chains: &[ValidationChain], req: &mut R) -> ValidationReport
where
    R: ValidatedRequest + ?Sized,
{
    for chain in chains {
        let _ = chain.run(req).await;
    }
    collected(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_records_intent_without_running() {
        let chain = query("name")
            .not_empty()
            .with_message("required")
            .is_length(LengthRange::between(3, 20));
        assert_eq!(chain.field(), "name");
        assert_eq!(chain.location(), Location::Query);
        assert!(!chain.is_optional());
        assert_eq!(chain.ops.len(), 2);
    }

    #[test]
    fn later_optionality_overwrites_earlier() {
        let chain = body("nick").optional().optional_nullable();
        assert_eq!(chain.optional, Some(Optionality { allow_null: true }));
    }

    #[test]
    #[should_panic(expected = "with_message called on an empty chain")]
    fn message_on_empty_chain_panics() {
        let _ = query("name").with_message("nope");
    }

    #[test]
    #[should_panic(expected = "must follow a validator, not a sanitizer")]
    fn message_on_sanitizer_panics() {
        let _ = query("name").trim().with_message("nope");
    }

    #[test]
    #[should_panic(expected = "already declares a sanitizer")]
    fn second_sanitizer_panics() {
        let _ = query("name").trim().escape();
    }

    #[test]
    #[should_panic(expected = "invalid regex")]
    fn broken_regex_panics() {
        let _ = query("name").matches("(unclosed");
    }

    #[test]
    fn message_lands_on_last_validator_only() {
        let chain = query("age")
            .not_empty()
            .is_int(IntRange::default())
            .with_message("must be a number");
        let messages: Vec<_> = chain
            .ops
            .iter()
            .map(|op| match op {
                Operation::Check { message, .. } => message.is_some(),
                _ => false,
            })
            .collect();
        assert_eq!(messages, [false, true]);
    }
}
