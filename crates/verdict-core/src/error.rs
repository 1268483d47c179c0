//! Error types for the Verdict core library
//!
//! This module defines the hard-error channel of the engine: failures that
//! occur while *building* a constraint, a range, or a data-model value.
//! Non-conformance of a candidate value at validation time is never an
//! `Error`; it is reported as a [`Violation`](crate::violation::Violation).
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Main error type for constraint and value construction
#[derive(Error, Debug)]
pub enum Error {
    /// A range description could not be turned into a usable range
    #[error("invalid range: {message}")]
    InvalidRange { message: String },

    /// A recognized constraint name was paired with an unusable fragment
    #[error("invalid '{constraint}' constraint: {message}")]
    InvalidConstraint {
        constraint: String,
        message: String,
    },

    /// The constraint factory did not recognize the field name.
    ///
    /// Callers decide whether this is fatal (strict handling) or skippable
    /// (lenient handling) by matching on this variant.
    #[error("unrecognized constraint: '{name}'")]
    UnrecognizedConstraint { name: String },

    /// A timestamp could not be constructed or parsed
    #[error("invalid timestamp: {message}")]
    InvalidTimestamp { message: String },

    /// A decimal could not be constructed or parsed
    #[error("invalid decimal: {message}")]
    InvalidDecimal { message: String },

    /// A document could not be materialized into data-model elements
    #[error("invalid document: {message}")]
    InvalidDocument {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl Error {
    /// Create an `InvalidRange` error
    pub fn invalid_range<M: Into<String>>(message: M) -> Self {
        Error::InvalidRange {
            message: message.into(),
        }
    }

    /// Create an `InvalidConstraint` error
    pub fn invalid_constraint<C, M>(constraint: C, message: M) -> Self
    where
        C: Into<String>,
        M: Into<String>,
    {
        Error::InvalidConstraint {
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// Create an `UnrecognizedConstraint` error
    pub fn unrecognized_constraint<N: Into<String>>(name: N) -> Self {
        Error::UnrecognizedConstraint { name: name.into() }
    }

    /// Create an `InvalidTimestamp` error
    pub fn invalid_timestamp<M: Into<String>>(message: M) -> Self {
        Error::InvalidTimestamp {
            message: message.into(),
        }
    }

    /// Create an `InvalidDecimal` error
    pub fn invalid_decimal<M: Into<String>>(message: M) -> Self {
        Error::InvalidDecimal {
            message: message.into(),
        }
    }

    /// Create an `InvalidDocument` error without an underlying cause
    pub fn invalid_document<M: Into<String>>(message: M) -> Self {
        Error::InvalidDocument {
            message: message.into(),
            source: None,
        }
    }

    /// Create an `InvalidDocument` error wrapping an underlying cause
    pub fn invalid_document_with_source<M: Into<String>>(
        message: M,
        source: anyhow::Error,
    ) -> Self {
        Error::InvalidDocument {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_range("lower bound 5 is greater than upper bound 1");
        assert_eq!(
            err.to_string(),
            "invalid range: lower bound 5 is greater than upper bound 1"
        );
    }

    #[test]
    fn test_unrecognized_constraint_display() {
        let err = Error::unrecognized_constraint("regex");
        assert_eq!(err.to_string(), "unrecognized constraint: 'regex'");
    }

    #[test]
    fn test_invalid_document_source_chain() {
        let cause = anyhow::anyhow!("unexpected end of input");
        let err = Error::invalid_document_with_source("document truncated", cause);
        let source = std::error::Error::source(&err).expect("source should be present");
        assert!(source.to_string().contains("unexpected end of input"));
    }
}
