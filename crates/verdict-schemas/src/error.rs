//! Error types for schema-system operations
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema-system operations
pub type Result<T> = std::result::Result<T, SystemError>;

/// Errors raised while assembling a schema system or resolving schemas
#[derive(Error, Debug)]
pub enum SystemError {
    /// No configured authority could produce the schema
    #[error(
        "schema '{schema_id}' could not be resolved by any of the {authorities_consulted} \
         configured authorities"
    )]
    UnresolvableSchema {
        schema_id: String,
        authorities_consulted: usize,
    },

    /// File I/O failure inside an authority
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A constraint or document construction failure from the engine
    #[error(transparent)]
    Core(#[from] verdict_core::Error),
}

impl SystemError {
    /// Create an `UnresolvableSchema` error
    pub fn unresolvable<S: Into<String>>(schema_id: S, authorities_consulted: usize) -> Self {
        SystemError::UnresolvableSchema {
            schema_id: schema_id.into(),
            authorities_consulted,
        }
    }

    /// Create an `Io` error
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        SystemError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolvable_display() {
        let err = SystemError::unresolvable("sample.schema", 2);
        assert_eq!(
            err.to_string(),
            "schema 'sample.schema' could not be resolved by any of the 2 configured authorities"
        );
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err = SystemError::from(verdict_core::Error::invalid_range("bad bounds"));
        assert_eq!(err.to_string(), "invalid range: bad bounds");
    }
}
