//! The `exponent` constraint
//!
//! Constrains the exponent a decimal was written with: `1.00` has
//! exponent -2, `12d3` has exponent 3. Bounds are plain integers and may
//! be negative.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::constraint::{type_guard, Constraint};
use crate::error::{Error, Result};
use crate::range::Range;
use crate::value::{Element, Value, ValueType};
use crate::violation::{codes, Violation, Violations};

/// Range check over a decimal's written exponent
#[derive(Debug, Clone)]
pub struct ExponentConstraint {
    range: Range<i128>,
}

impl ExponentConstraint {
    pub const NAME: &'static str = "exponent";

    pub fn new(fragment: &Element) -> Result<Self> {
        let range = Range::from_element(fragment)
            .map_err(|e| Error::invalid_constraint(Self::NAME, e.to_string()))?;
        Ok(Self { range })
    }
}

impl Constraint for ExponentConstraint {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, value: &Element, issues: &mut Violations) {
        if !type_guard(Self::NAME, &[ValueType::Decimal], value, issues) {
            return;
        }
        if let Value::Decimal(decimal) = value.value() {
            let actual = i128::from(decimal.exponent());
            if !self.range.contains(&actual) {
                issues.push(Violation::new(
                    Self::NAME,
                    codes::INVALID_EXPONENT,
                    format!(
                        "decimal exponent is {}, expected {}",
                        actual,
                        self.range.text()
                    ),
                ));
            }
        }
    }
}
