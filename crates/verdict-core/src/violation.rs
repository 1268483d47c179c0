//! Violation reporting
//!
//! A candidate value that does not conform to a constraint is never an
//! error: the constraint appends a [`Violation`] to the caller's
//! [`Violations`] collector and returns. An empty collector after
//! validation is the sole success signal. Constraints that delegate to
//! sub-constraints attach the delegated failures as children, preserving
//! where in the constraint tree each failure came from.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known violation codes.
///
/// The taxonomy is open: these are the codes the shipped constraints
/// emit, but any string is a valid code.
pub mod codes {
    /// The candidate value's run-time type does not match the constraint
    pub const INVALID_TYPE: &str = "invalid_type";
    /// A timestamp's precision falls outside the constrained range
    pub const INVALID_TIMESTAMP_PRECISION: &str = "invalid_timestamp_precision";
    /// A decimal's significant-digit count falls outside the range
    pub const INVALID_PRECISION: &str = "invalid_precision";
    /// A decimal's exponent falls outside the range
    pub const INVALID_EXPONENT: &str = "invalid_exponent";
    /// A container's element count falls outside the range
    pub const INVALID_CONTAINER_LENGTH: &str = "invalid_container_length";
}

/// One failed check, possibly aggregating the failures of sub-checks.
///
/// A leaf (no children) is a directly-failed check; a node with children
/// is an aggregate whose children explain which delegated checks failed.
/// Violations are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Label of the schema construct that produced this violation
    constraint: String,
    /// Machine-readable failure code
    code: String,
    /// Human-readable description, stating actual vs expected
    message: String,
    /// Failures of delegated sub-checks, in the order they occurred
    violations: Vec<Violation>,
}

impl Violation {
    /// A leaf violation for a directly-failed check
    pub fn new<C, D, M>(constraint: C, code: D, message: M) -> Self
    where
        C: Into<String>,
        D: Into<String>,
        M: Into<String>,
    {
        Self {
            constraint: constraint.into(),
            code: code.into(),
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// An aggregate violation with explicit children
    pub fn with_children<C, D, M>(
        constraint: C,
        code: D,
        message: M,
        children: Vec<Violation>,
    ) -> Self
    where
        C: Into<String>,
        D: Into<String>,
        M: Into<String>,
    {
        Self {
            constraint: constraint.into(),
            code: code.into(),
            message: message.into(),
            violations: children,
        }
    }

    /// Consume a local collector into an aggregate violation.
    ///
    /// This is the delegation pattern: a parent constraint runs its
    /// sub-constraints against a fresh collector, then attaches whatever
    /// accumulated as the children of its own violation.
    pub fn aggregate<C, D, M>(constraint: C, code: D, message: M, children: Violations) -> Self
    where
        C: Into<String>,
        D: Into<String>,
        M: Into<String>,
    {
        Self::with_children(constraint, code, message, children.entries)
    }

    pub fn constraint(&self) -> &str {
        &self.constraint
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// True for a directly-failed check with no delegated children
    pub fn is_leaf(&self) -> bool {
        self.violations.is_empty()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        write!(f, "{} [{}]: {}", self.constraint, self.code, self.message)?;
        for child in &self.violations {
            writeln!(f)?;
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Append-only collector of violations for one validation call.
///
/// Create one per top-level validation; never share a collector between
/// concurrent validations. Emptiness after validation means the value
/// conformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violations {
    entries: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one violation; entries are never removed or reordered
    pub fn push(&mut self, violation: Violation) {
        self.entries.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.entries
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}
