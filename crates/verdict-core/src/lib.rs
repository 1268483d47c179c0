//! Verdict core - the constraint-evaluation engine
//!
//! This crate validates structured data values against declarative schema
//! constraints and reports structured, composable failures instead of
//! raising on the first error:
//!
//! - **Values** ([`value`]): the structured-value data model - scalars
//!   (including exact decimals and precision-carrying timestamps),
//!   containers, and type annotations - plus a text reader for documents.
//! - **Ranges** ([`range`]): one bounded-interval abstraction shared by
//!   every numeric, length, and temporal constraint, over a closed set of
//!   ordered domains.
//! - **Violations** ([`violation`]): the hierarchical failure report. A
//!   value that does not conform is never an error; it appends violations
//!   to a caller-supplied collector, and an empty collector is the only
//!   success signal.
//! - **Constraints** ([`constraint`]): the polymorphic `validate`
//!   contract, its shared type guard, the shipped range-based constraint
//!   kinds, and the constraint factory.
//!
//! Construction problems (malformed ranges, inverted bounds, unreadable
//! documents) are hard [`Error`]s; they never mix with the violation
//! channel.
//!
//! ## Example
//!
//! ```rust
//! use verdict_core::constraint::{Constraint, TimestampPrecisionConstraint};
//! use verdict_core::value::reader::read_document;
//! use verdict_core::violation::Violations;
//!
//! # fn main() -> verdict_core::Result<()> {
//! let fragment = read_document("day")?.remove(0);
//! let constraint = TimestampPrecisionConstraint::new(&fragment)?;
//!
//! let candidate = read_document("2020-01-01T10:00Z")?.remove(0);
//! let mut issues = Violations::new();
//! constraint.validate(&candidate, &mut issues);
//!
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues.as_slice()[0].code(), "invalid_timestamp_precision");
//! # Ok(())
//! # }
//! ```
//!
//! Constraint instances are immutable after construction and safe to
//! share across threads; give each concurrent validation call its own
//! [`Violations`] collector.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

pub mod constraint;
pub mod error;
pub mod range;
pub mod value;
pub mod violation;

pub use constraint::{Constraint, ConstraintFactory, CoreConstraintFactory};
pub use error::{Error, Result};
pub use range::{Boundary, Range, RangeDomain, RangeType};
pub use value::{Decimal, Element, PrecisionClass, Timestamp, Value, ValueType};
pub use violation::{Violation, Violations};
