//! Errors surfaced by parameter declaration, parsing, and resolution.

use thiserror::Error;

/// Error taxonomy for the parameter core.
///
/// Every variant is fatal at the call site that produced it; nothing in this
/// crate retries or suppresses one. Non-fatal conditions (deprecated input
/// paths, type-mismatch notices) are emitted as `tracing` warnings instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// `require` found no candidate across any priority source.
    #[error("no value supplied for parameter '{name}'")]
    MissingValue {
        /// Name of the parameter that could not be resolved.
        name: String,
    },
    /// Raw text could not be converted to the target type, or the converted
    /// value failed range/membership/existence validation.
    #[error("invalid value '{raw}': expected {expected}")]
    InvalidValue {
        /// The offending raw text (or rendered value).
        raw: String,
        /// Description of the permitted domain.
        expected: String,
    },
    /// The declaration cannot support the requested operation.
    #[error("parameter is misconfigured: {reason}")]
    Misconfigured {
        /// What is wrong with the declaration.
        reason: String,
    },
    /// Batch composition was handed an empty value list.
    #[error("empty value list passed to batch composition")]
    EmptyBatch,
}

impl ParameterError {
    /// Shorthand for an [`InvalidValue`](Self::InvalidValue) error.
    pub fn invalid(raw: impl Into<String>, expected: impl Into<String>) -> Self {
        ParameterError::InvalidValue {
            raw: raw.into(),
            expected: expected.into(),
        }
    }
}
