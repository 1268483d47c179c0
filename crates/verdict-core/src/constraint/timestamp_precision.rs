//! The `timestamp_precision` constraint
//!
//! Constrains how precisely a timestamp is *written*, not its instant:
//! the candidate timestamp is projected onto [`PrecisionClass`] and that
//! classification is tested against a range whose bounds are precision
//! keywords (`day`, `second`, ...).
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::constraint::{type_guard, Constraint};
use crate::error::{Error, Result};
use crate::range::Range;
use crate::value::{Element, PrecisionClass, Value, ValueType};
use crate::violation::{codes, Violation, Violations};

/// Range check over a timestamp's precision classification
#[derive(Debug, Clone)]
pub struct TimestampPrecisionConstraint {
    range: Range<PrecisionClass>,
}

impl TimestampPrecisionConstraint {
    pub const NAME: &'static str = "timestamp_precision";

    /// Build from the schema fragment's field value, e.g. `day` or
    /// `[second, max]`
    pub fn new(fragment: &Element) -> Result<Self> {
        let range = Range::from_element(fragment)
            .map_err(|e| Error::invalid_constraint(Self::NAME, e.to_string()))?;
        Ok(Self { range })
    }

    /// The expected-precision description, as written in the schema
    pub fn expected(&self) -> &str {
        self.range.text()
    }
}

impl Constraint for TimestampPrecisionConstraint {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, value: &Element, issues: &mut Violations) {
        if !type_guard(Self::NAME, &[ValueType::Timestamp], value, issues) {
            return;
        }
        if let Value::Timestamp(timestamp) = value.value() {
            let actual = timestamp.precision_class();
            if !self.range.contains(&actual) {
                issues.push(Violation::new(
                    Self::NAME,
                    codes::INVALID_TIMESTAMP_PRECISION,
                    format!(
                        "timestamp precision is {}, expected {}",
                        actual,
                        self.range.text()
                    ),
                ));
            }
        }
    }
}
