//! End-to-end constraint-evaluation scenarios
//!
//! Exercises the engine the way a schema consumer does: fragments and
//! candidates arrive as document text, constraints are built through the
//! factory, and outcomes are read off the violation collector.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use proptest::prelude::*;
use verdict_core::constraint::{Constraint, CoreConstraintFactory, TimestampPrecisionConstraint};
use verdict_core::value::reader::read_document;
use verdict_core::violation::{codes, Violations};
use verdict_core::{ConstraintFactory, Element, Error, Range, Timestamp};

fn element(text: &str) -> Element {
    read_document(text)
        .expect("test document should read")
        .remove(0)
}

fn validate(constraint: &dyn Constraint, candidate: &str) -> Violations {
    let mut issues = Violations::new();
    constraint.validate(&element(candidate), &mut issues);
    issues
}

#[test]
fn inclusive_integer_range() {
    let range = Range::<i128>::from_element(&element("[1, 5]")).expect("should build");
    assert!(range.contains(&3));
    assert!(range.contains(&5));
    assert!(!range.contains(&6));
    assert!(!range.contains(&0));
}

#[test]
fn exclusive_lower_bound() {
    let range = Range::<i128>::from_element(&element("[exclusive::1, 5]")).expect("should build");
    assert!(!range.contains(&1));
    assert!(range.contains(&5));
}

#[test]
fn day_precision_constraint_end_to_end() {
    let constraint =
        TimestampPrecisionConstraint::new(&element("day")).expect("should build");

    assert!(validate(&constraint, "2020-01-01").is_empty());

    let issues = validate(&constraint, "2020-01-01T10:00Z");
    assert_eq!(issues.len(), 1);
    let violation = &issues.as_slice()[0];
    assert_eq!(violation.code(), codes::INVALID_TIMESTAMP_PRECISION);
    assert!(violation.message().contains("minute"), "actual precision");
    assert!(violation.message().contains("day"), "expected precision");
}

#[test]
fn inverted_bounds_never_build() {
    let err = Range::<i128>::from_element(&element("[5, 1]"))
        .expect_err("inverted bounds must fail construction");
    assert!(matches!(err, Error::InvalidRange { .. }));
}

#[test]
fn mistyped_candidate_gets_exactly_one_invalid_type_violation() {
    let constraint =
        TimestampPrecisionConstraint::new(&element("day")).expect("should build");
    let issues = validate(&constraint, "\"not a timestamp\"");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].code(), codes::INVALID_TYPE);
}

#[test]
fn type_guard_applies_to_every_shipped_kind() {
    let factory = CoreConstraintFactory;
    for (name, fragment) in [
        ("timestamp_precision", "day"),
        ("precision", "[1, 5]"),
        ("exponent", "[-2, 0]"),
        ("container_length", "[0, 10]"),
    ] {
        let constraint = factory
            .constraint_for(name, &element(fragment))
            .expect("shipped constraint should build");
        let issues = validate(constraint.as_ref(), "null");
        assert_eq!(issues.len(), 1, "{} must reject null", name);
        assert_eq!(issues.as_slice()[0].code(), codes::INVALID_TYPE);
    }
}

#[test]
fn validation_is_repeatable_on_one_constraint_instance() {
    let constraint =
        TimestampPrecisionConstraint::new(&element("[minute, second]")).expect("should build");
    for _ in 0..3 {
        assert!(validate(&constraint, "2020-01-01T10:00Z").is_empty());
        assert_eq!(validate(&constraint, "2020-01-01").len(), 1);
    }
}

#[test]
fn constraints_are_shareable_across_threads() {
    let constraint = std::sync::Arc::new(
        TimestampPrecisionConstraint::new(&element("day")).expect("should build"),
    );
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let constraint = std::sync::Arc::clone(&constraint);
            std::thread::spawn(move || {
                let mut issues = Violations::new();
                constraint.validate(&element("2020-01-01T10:00Z"), &mut issues);
                issues.len()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("thread should finish"), 1);
    }
}

proptest! {
    /// Both endpoints of an inclusive pair are inside, their neighbors
    /// outside
    #[test]
    fn endpoints_of_inclusive_ranges(a in -1000i128..1000, b in -1000i128..1000) {
        let (low, high) = (a.min(b), a.max(b));
        let range = Range::<i128>::from_element(&element(&format!("[{}, {}]", low, high)))
            .expect("ordered bounds should build");
        prop_assert!(range.contains(&low));
        prop_assert!(range.contains(&high));
        prop_assert!(!range.contains(&(low - 1)));
        prop_assert!(!range.contains(&(high + 1)));
    }

    /// Marking one bound exclusive flips only that endpoint
    #[test]
    fn exclusivity_flags_are_independent(a in -1000i128..1000, span in 1i128..1000) {
        let b = a + span;
        let lower_exclusive =
            Range::<i128>::from_element(&element(&format!("[exclusive::{}, {}]", a, b)))
                .expect("should build");
        prop_assert!(!lower_exclusive.contains(&a));
        prop_assert!(lower_exclusive.contains(&b));

        let upper_exclusive =
            Range::<i128>::from_element(&element(&format!("[{}, exclusive::{}]", a, b)))
                .expect("should build");
        prop_assert!(upper_exclusive.contains(&a));
        prop_assert!(!upper_exclusive.contains(&b));
    }

    /// An exact-value range contains exactly its value
    #[test]
    fn exact_ranges_contain_one_value(v in -1000i128..1000, other in -1000i128..1000) {
        let range = Range::<i128>::from_element(&element(&v.to_string()))
            .expect("should build");
        prop_assert!(range.contains(&v));
        prop_assert_eq!(range.contains(&other), other == v);
    }

    /// More fractional-second digits always classify strictly greater
    #[test]
    fn fractional_digits_refine_precision(digits in 1usize..9) {
        let coarse = format!("2020-01-01T10:00:05.{}Z", "5".repeat(digits));
        let fine = format!("2020-01-01T10:00:05.{}Z", "5".repeat(digits + 1));
        let coarse: Timestamp = coarse.parse().expect("should parse");
        let fine: Timestamp = fine.parse().expect("should parse");
        prop_assert!(coarse.precision_class() < fine.precision_class());
    }
}
