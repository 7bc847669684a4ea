//! Schema construction errors.

use thiserror::Error;

/// Errors raised while building a schema.
///
/// These are fatal: a builder that reports one produces no usable schema.
/// Runtime validation failures are not errors in this sense — they are
/// returned as data in [`ValidationResult`](crate::ValidationResult).
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A field was declared with an empty name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// The same field name was declared twice.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// A refinement attributes its error to a field the schema never declares.
    #[error("refinement attributed to undeclared field: {0}")]
    UnknownAttributionField(String),

    /// A pattern rule carried an invalid regular expression.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
