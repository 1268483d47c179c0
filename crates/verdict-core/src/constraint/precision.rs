//! The `precision` constraint
//!
//! Constrains the number of significant digits a decimal was written
//! with: `1.00` has three, `0.005` has one.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::constraint::{type_guard, Constraint};
use crate::error::{Error, Result};
use crate::range::Range;
use crate::value::{Element, Value, ValueType};
use crate::violation::{codes, Violation, Violations};

/// Range check over a decimal's significant-digit count
#[derive(Debug, Clone)]
pub struct PrecisionConstraint {
    range: Range<usize>,
}

impl PrecisionConstraint {
    pub const NAME: &'static str = "precision";

    pub fn new(fragment: &Element) -> Result<Self> {
        let range = Range::from_element(fragment)
            .map_err(|e| Error::invalid_constraint(Self::NAME, e.to_string()))?;
        Ok(Self { range })
    }
}

impl Constraint for PrecisionConstraint {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, value: &Element, issues: &mut Violations) {
        if !type_guard(Self::NAME, &[ValueType::Decimal], value, issues) {
            return;
        }
        if let Value::Decimal(decimal) = value.value() {
            let actual = decimal.precision();
            if !self.range.contains(&actual) {
                issues.push(Violation::new(
                    Self::NAME,
                    codes::INVALID_PRECISION,
                    format!(
                        "decimal precision is {}, expected {}",
                        actual,
                        self.range.text()
                    ),
                ));
            }
        }
    }
}
