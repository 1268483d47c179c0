//! Bounded ranges over ordered domains
//!
//! Every numeric, length, and temporal constraint expresses its bounds
//! through one [`Range`] abstraction so that inclusive/exclusive edge
//! semantics are decided in exactly one place. A range is built once from
//! a schema element — either a two-element bound pair `[lower, upper]` or
//! a bare value meaning "exactly this" — and is immutable afterwards.
//!
//! The supported domains are closed ([`RangeType`]); each domain supplies
//! its own bound parser through [`RangeDomain`]. The timestamp-precision
//! domain is the projection case: its bounds are precision keywords and
//! its comparisons run over [`PrecisionClass`] values derived from the
//! candidate timestamp, not over the timestamp instants themselves.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::value::{Decimal, Element, PrecisionClass, Timestamp, Value};
use std::fmt;

/// The closed set of ordered domains ranges are defined over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeType {
    Integer,
    Decimal,
    Timestamp,
    TimestampPrecision,
    Length,
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RangeType::Integer => "integer",
            RangeType::Decimal => "decimal",
            RangeType::Timestamp => "timestamp",
            RangeType::TimestampPrecision => "timestamp precision",
            RangeType::Length => "length",
        };
        write!(f, "{}", name)
    }
}

/// A domain ranges can be built over: how bound literals parse, and
/// which [`RangeType`] names the domain in error messages.
///
/// The comparison function is the domain's `Ord`; domains that compare a
/// projection of the candidate (timestamp precision) apply the projection
/// before calling [`Range::contains`].
pub trait RangeDomain: Clone + Ord + fmt::Debug + fmt::Display {
    const RANGE_TYPE: RangeType;

    /// Parse a bound literal of this domain out of a schema element
    fn parse_bound(element: &Element) -> Result<Self>;
}

impl RangeDomain for i128 {
    const RANGE_TYPE: RangeType = RangeType::Integer;

    fn parse_bound(element: &Element) -> Result<Self> {
        match element.value() {
            Value::Int(i) => Ok(*i),
            other => Err(bound_error(other, Self::RANGE_TYPE)),
        }
    }
}

impl RangeDomain for Decimal {
    const RANGE_TYPE: RangeType = RangeType::Decimal;

    /// Integer literals widen to decimal bounds
    fn parse_bound(element: &Element) -> Result<Self> {
        match element.value() {
            Value::Decimal(d) => Ok(*d),
            Value::Int(i) => Ok(Decimal::from(*i)),
            other => Err(bound_error(other, Self::RANGE_TYPE)),
        }
    }
}

impl RangeDomain for Timestamp {
    const RANGE_TYPE: RangeType = RangeType::Timestamp;

    fn parse_bound(element: &Element) -> Result<Self> {
        match element.value() {
            Value::Timestamp(t) => Ok(*t),
            other => Err(bound_error(other, Self::RANGE_TYPE)),
        }
    }
}

impl RangeDomain for PrecisionClass {
    const RANGE_TYPE: RangeType = RangeType::TimestampPrecision;

    /// Bounds are precision keywords written as symbols or strings
    fn parse_bound(element: &Element) -> Result<Self> {
        let keyword = match element.value() {
            Value::Symbol(s) | Value::String(s) => s,
            other => return Err(bound_error(other, Self::RANGE_TYPE)),
        };
        PrecisionClass::from_keyword(keyword).ok_or_else(|| {
            Error::invalid_range(format!(
                "'{}' is not a timestamp precision keyword",
                keyword
            ))
        })
    }
}

impl RangeDomain for usize {
    const RANGE_TYPE: RangeType = RangeType::Length;

    fn parse_bound(element: &Element) -> Result<Self> {
        match element.value() {
            Value::Int(i) if *i >= 0 => usize::try_from(*i).map_err(|_| {
                Error::invalid_range(format!("length bound {} is out of range", i))
            }),
            Value::Int(i) => Err(Error::invalid_range(format!(
                "length bound {} cannot be negative",
                i
            ))),
            other => Err(bound_error(other, Self::RANGE_TYPE)),
        }
    }
}

fn bound_error(value: &Value, range_type: RangeType) -> Error {
    Error::invalid_range(format!(
        "'{}' is not a valid {} bound",
        value, range_type
    ))
}

/// One end of a range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary<T> {
    /// No bound on this end (`min` / `max` sentinel)
    Unbounded,
    /// The bound value itself is inside the range
    Inclusive(T),
    /// The bound value itself is outside the range
    Exclusive(T),
}

impl<T> Boundary<T> {
    /// The bound value, if this end is bounded
    pub fn value(&self) -> Option<&T> {
        match self {
            Boundary::Unbounded => None,
            Boundary::Inclusive(value) | Boundary::Exclusive(value) => Some(value),
        }
    }
}

impl<T: Ord> Boundary<T> {
    /// Does `value` satisfy this boundary acting as the lower end?
    fn admits_from_below(&self, value: &T) -> bool {
        match self {
            Boundary::Unbounded => true,
            Boundary::Inclusive(bound) => value >= bound,
            Boundary::Exclusive(bound) => value > bound,
        }
    }

    /// Does `value` satisfy this boundary acting as the upper end?
    fn admits_from_above(&self, value: &T) -> bool {
        match self {
            Boundary::Unbounded => true,
            Boundary::Inclusive(bound) => value <= bound,
            Boundary::Exclusive(bound) => value < bound,
        }
    }
}

/// Which slot of a bound pair is being parsed; sentinels are slot-specific
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Lower,
    Upper,
}

/// An immutable bounded interval over an ordered domain.
///
/// `text` preserves the source description for expected-vs-actual
/// violation messages.
#[derive(Debug, Clone)]
pub struct Range<T> {
    lower: Boundary<T>,
    upper: Boundary<T>,
    text: String,
}

impl<T: RangeDomain> Range<T> {
    /// An exact-match range containing only `value`
    pub fn exact(value: T) -> Self {
        let text = value.to_string();
        Self {
            lower: Boundary::Inclusive(value.clone()),
            upper: Boundary::Inclusive(value),
            text,
        }
    }

    /// Build a range from explicit boundaries, checking bound ordering
    pub fn new(lower: Boundary<T>, upper: Boundary<T>) -> Result<Self> {
        let text = render(&lower, &upper);
        check_ordering(&lower, &upper)?;
        Ok(Self { lower, upper, text })
    }

    /// Build a range from a schema element.
    ///
    /// Accepts a two-element list `[lower, upper]` (bounds may carry an
    /// `exclusive` annotation, the symbols `min`/`max` leave an end
    /// unbounded) or a single bare value meaning exactly that value.
    pub fn from_element(element: &Element) -> Result<Self> {
        match element.value() {
            Value::List(items) => {
                if items.len() != 2 {
                    return Err(Error::invalid_range(format!(
                        "a range pair needs exactly two elements, found {} in '{}'",
                        items.len(),
                        element
                    )));
                }
                let lower = parse_boundary(&items[0], Slot::Lower)?;
                let upper = parse_boundary(&items[1], Slot::Upper)?;
                check_ordering(&lower, &upper)?;
                Ok(Self {
                    lower,
                    upper,
                    text: element.to_string(),
                })
            }
            _ => {
                if element.has_annotation("exclusive") {
                    return Err(Error::invalid_range(format!(
                        "an exact value cannot be exclusive: '{}'",
                        element
                    )));
                }
                let value = T::parse_bound(element)?;
                // Keep the source rendering for diagnostics
                Ok(Self {
                    text: element.to_string(),
                    ..Self::exact(value)
                })
            }
        }
    }

    pub fn lower(&self) -> &Boundary<T> {
        &self.lower
    }

    pub fn upper(&self) -> &Boundary<T> {
        &self.upper
    }

    /// The source description this range was built from
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True iff `value` lies within both boundaries
    pub fn contains(&self, value: &T) -> bool {
        self.lower.admits_from_below(value) && self.upper.admits_from_above(value)
    }
}

impl<T> fmt::Display for Range<T> {
    /// Renders the preserved source description
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

fn parse_boundary<T: RangeDomain>(item: &Element, slot: Slot) -> Result<Boundary<T>> {
    let exclusive = item.has_annotation("exclusive");
    if let Value::Symbol(symbol) = item.value() {
        match (symbol.as_str(), slot) {
            ("min", Slot::Lower) | ("max", Slot::Upper) => {
                return if exclusive {
                    Err(Error::invalid_range(format!(
                        "'{}' cannot be exclusive",
                        symbol
                    )))
                } else {
                    Ok(Boundary::Unbounded)
                };
            }
            ("min", Slot::Upper) => {
                return Err(Error::invalid_range(
                    "'min' may only appear as the lower bound",
                ));
            }
            ("max", Slot::Lower) => {
                return Err(Error::invalid_range(
                    "'max' may only appear as the upper bound",
                ));
            }
            // Other symbols may be legitimate bound literals, e.g.
            // precision keywords
            _ => {}
        }
    }
    let value = T::parse_bound(item)?;
    Ok(if exclusive {
        Boundary::Exclusive(value)
    } else {
        Boundary::Inclusive(value)
    })
}

fn check_ordering<T: RangeDomain>(lower: &Boundary<T>, upper: &Boundary<T>) -> Result<()> {
    if let (Some(low), Some(high)) = (lower.value(), upper.value()) {
        if low > high {
            return Err(Error::invalid_range(format!(
                "lower bound {} is greater than upper bound {}",
                low, high
            )));
        }
    }
    Ok(())
}

fn render<T: fmt::Display>(lower: &Boundary<T>, upper: &Boundary<T>) -> String {
    let end = |boundary: &Boundary<T>, sentinel: &str| match boundary {
        Boundary::Unbounded => sentinel.to_string(),
        Boundary::Inclusive(value) => value.to_string(),
        Boundary::Exclusive(value) => format!("exclusive::{}", value),
    };
    format!("[{}, {}]", end(lower, "min"), end(upper, "max"))
}
