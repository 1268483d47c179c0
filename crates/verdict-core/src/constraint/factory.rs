//! Constraint construction from schema-fragment fields
//!
//! The factory is the extension point for the constraint catalog: given a
//! field name and its value, it either builds the matching constraint or
//! signals `UnrecognizedConstraint`, leaving strict-vs-lenient handling
//! to the caller.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::constraint::{
    Constraint, ContainerLengthConstraint, ExponentConstraint, PrecisionConstraint,
    TimestampPrecisionConstraint,
};
use crate::error::{Error, Result};
use crate::value::Element;
use std::fmt;

/// Builds constraints from schema-fragment fields.
///
/// Returns [`Error::UnrecognizedConstraint`] for a field name the factory
/// does not know; callers match on that variant to decide whether an
/// unknown name is fatal.
pub trait ConstraintFactory: fmt::Debug + Send + Sync {
    fn constraint_for(&self, field_name: &str, value: &Element) -> Result<Box<dyn Constraint>>;
}

/// The factory for the shipped constraint kinds
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreConstraintFactory;

impl ConstraintFactory for CoreConstraintFactory {
    fn constraint_for(&self, field_name: &str, value: &Element) -> Result<Box<dyn Constraint>> {
        match field_name {
            TimestampPrecisionConstraint::NAME => {
                Ok(Box::new(TimestampPrecisionConstraint::new(value)?))
            }
            PrecisionConstraint::NAME => Ok(Box::new(PrecisionConstraint::new(value)?)),
            ExponentConstraint::NAME => Ok(Box::new(ExponentConstraint::new(value)?)),
            ContainerLengthConstraint::NAME => {
                Ok(Box::new(ContainerLengthConstraint::new(value)?))
            }
            other => Err(Error::unrecognized_constraint(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::reader::read_document;
    use crate::violation::Violations;

    fn fragment(text: &str) -> Element {
        read_document(text)
            .expect("test fragment should read")
            .remove(0)
    }

    #[test]
    fn test_builds_every_shipped_kind() {
        let factory = CoreConstraintFactory;
        for (name, value) in [
            ("timestamp_precision", "day"),
            ("precision", "[1, 5]"),
            ("exponent", "[-2, 0]"),
            ("container_length", "[0, 10]"),
        ] {
            let constraint = factory
                .constraint_for(name, &fragment(value))
                .expect("shipped constraint should build");
            assert_eq!(constraint.name(), name);
        }
    }

    #[test]
    fn test_unrecognized_name_is_its_own_variant() {
        let err = CoreConstraintFactory
            .constraint_for("regex", &fragment("\".*\""))
            .expect_err("unknown names must not build");
        assert!(matches!(err, Error::UnrecognizedConstraint { ref name } if name == "regex"));
    }

    #[test]
    fn test_bad_fragment_fails_construction() {
        let err = CoreConstraintFactory
            .constraint_for("precision", &fragment("[5, 1]"))
            .expect_err("inverted bounds must not build");
        assert!(matches!(err, Error::InvalidConstraint { .. }));
    }

    #[test]
    fn test_built_constraints_validate() {
        let constraint = CoreConstraintFactory
            .constraint_for("timestamp_precision", &fragment("day"))
            .expect("should build");
        let mut issues = Violations::new();
        constraint.validate(&fragment("2020-01-01"), &mut issues);
        assert!(issues.is_empty());
    }
}
