//! Core error types for the formworks toolkit.
//!
//! This module provides the [`FormworksError`] enum covering every error
//! category the toolkit produces: attribute and submission validation,
//! document integrity, drag-resolution invariant violations, missing
//! records, and persistence failures.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional per-attribute errors.
///
/// Validation errors are either simple (a single message) or compound
/// (containing per-attribute error lists), so that a property editor can
/// show every problem at once instead of the first one found.
///
/// # Examples
///
/// ```
/// use formworks_core::error::ValidationError;
///
/// // Simple validation error
/// let err = ValidationError::new("Name must contain at least 4 characters.", "min_length");
///
/// // Attribute-level validation errors
/// let mut attr_errors = std::collections::HashMap::new();
/// attr_errors.insert(
///     "label".to_string(),
///     vec![ValidationError::new("Ensure this value has at most 80 characters.", "max_length")],
/// );
/// let err = ValidationError::with_attribute_errors(attr_errors);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of failure (e.g. "required", "max_length").
    pub code: String,
    /// Per-attribute validation errors, keyed by attribute name.
    pub attribute_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            attribute_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-attribute errors.
    pub fn with_attribute_errors(attribute_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            attribute_errors,
        }
    }

    /// Returns `true` if this error carries no message and no attribute errors.
    pub fn is_empty(&self) -> bool {
        self.message.is_empty() && self.attribute_errors.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.attribute_errors.is_empty() {
            let mut names: Vec<&String> = self.attribute_errors.keys().collect();
            names.sort();
            let mut first = true;
            for name in names {
                for error in &self.attribute_errors[name] {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{name}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for the formworks toolkit.
///
/// Variants divide into three severities the caller should handle
/// differently:
///
/// - **Recoverable, shown inline**: [`Validation`](Self::Validation).
/// - **Fatal for the document, surfaced as a page error**:
///   [`UnknownFieldKind`](Self::UnknownFieldKind),
///   [`CorruptDocument`](Self::CorruptDocument).
/// - **Internal invariant violations, logged and swallowed by the
///   gesture layer**: [`ElementNotFound`](Self::ElementNotFound).
#[derive(Error, Debug)]
pub enum FormworksError {
    /// An attribute bag or submitted value violated its schema. Recoverable.
    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    /// A field kind tag has no registry entry. Fatal data-integrity error
    /// for the document that references it.
    #[error("Unknown field kind: {0}")]
    UnknownFieldKind(String),

    /// A stored document blob could not be decoded. Fatal for that document.
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    /// A drag descriptor referenced a field id that is no longer present.
    /// Logged by the gesture layer; the mutation is aborted.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The requested form or share token does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A write was attempted against a published (read-only) form.
    #[error("Form is published and read-only: {0}")]
    Frozen(String),

    /// A persistence call failed transiently. In-memory state is left
    /// untouched so the caller may retry.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The toolkit was configured incorrectly (bad settings file, bad
    /// log filter).
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),
}

impl FormworksError {
    /// Shorthand for a simple validation error.
    pub fn validation(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(message, code))
    }

    /// Returns `true` for errors a user can correct and retry inline.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Storage(_))
    }
}

impl From<ValidationError> for FormworksError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// Convenience alias used across the workspace.
pub type FormworksResult<T> = Result<T, FormworksError>;
