//! The constraint contract and the shipped constraint kinds
//!
//! Every constraint is built once from a schema fragment and exposes one
//! operation: [`Constraint::validate`]. Validation follows a guarded
//! dispatch shared by all kinds: first the type guard (a mistyped value
//! gets exactly one `invalid_type` violation and the domain logic never
//! runs), then the constraint-specific check. Success appends nothing;
//! an empty collector is the only success signal.
//!
//! Constraint instances are immutable after construction and safe to
//! share across concurrent validation calls; each call must bring its
//! own [`Violations`] collector.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

mod container_length;
mod exponent;
mod factory;
mod precision;
mod timestamp_precision;

pub use container_length::ContainerLengthConstraint;
pub use exponent::ExponentConstraint;
pub use factory::{ConstraintFactory, CoreConstraintFactory};
pub use precision::PrecisionConstraint;
pub use timestamp_precision::TimestampPrecisionConstraint;

use crate::value::{Element, ValueType};
use crate::violation::{codes, Violation, Violations};
use std::fmt;

/// A single named validation rule, applied to candidate values.
///
/// Implementations never mutate themselves or the candidate during
/// validation; all effects are appends to the caller's collector.
pub trait Constraint: fmt::Debug + Send + Sync {
    /// The constraint name as written in the schema
    fn name(&self) -> &str;

    /// Check `value`, appending zero or more violations to `issues`
    fn validate(&self, value: &Element, issues: &mut Violations);
}

/// The shared type guard.
///
/// Returns true when the candidate's run-time type is one of `expected`;
/// otherwise appends exactly one `invalid_type` leaf violation and
/// returns false, so the caller skips its domain check. `null` never
/// passes a guard.
fn type_guard(
    name: &str,
    expected: &[ValueType],
    element: &Element,
    issues: &mut Violations,
) -> bool {
    let actual = element.value().value_type();
    if actual != ValueType::Null && expected.contains(&actual) {
        return true;
    }
    let expected_names: Vec<String> = expected.iter().map(ToString::to_string).collect();
    issues.push(Violation::new(
        name,
        codes::INVALID_TYPE,
        format!(
            "expected a value of type {}, found {}",
            expected_names.join(" or "),
            actual
        ),
    ));
    false
}
