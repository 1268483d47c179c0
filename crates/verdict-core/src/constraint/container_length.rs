//! The `container_length` constraint
//!
//! Constrains how many elements a container holds. Applies to lists,
//! bags, and structs (counting fields, repeated names included).
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::constraint::{type_guard, Constraint};
use crate::error::{Error, Result};
use crate::range::Range;
use crate::value::{Element, Value, ValueType};
use crate::violation::{codes, Violation, Violations};

/// Range check over a container's element count
#[derive(Debug, Clone)]
pub struct ContainerLengthConstraint {
    range: Range<usize>,
}

impl ContainerLengthConstraint {
    pub const NAME: &'static str = "container_length";

    pub fn new(fragment: &Element) -> Result<Self> {
        let range = Range::from_element(fragment)
            .map_err(|e| Error::invalid_constraint(Self::NAME, e.to_string()))?;
        Ok(Self { range })
    }
}

impl Constraint for ContainerLengthConstraint {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, value: &Element, issues: &mut Violations) {
        let expected = [ValueType::List, ValueType::Bag, ValueType::Struct];
        if !type_guard(Self::NAME, &expected, value, issues) {
            return;
        }
        let actual = match value.value() {
            Value::List(items) | Value::Bag(items) => items.len(),
            Value::Struct(fields) => fields.len(),
            _ => return,
        };
        if !self.range.contains(&actual) {
            issues.push(Violation::new(
                Self::NAME,
                codes::INVALID_CONTAINER_LENGTH,
                format!(
                    "container length is {}, expected {}",
                    actual,
                    self.range.text()
                ),
            ));
        }
    }
}
