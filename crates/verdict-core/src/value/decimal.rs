//! Exact base-10 decimal values
//!
//! A `Decimal` preserves the value exactly as written: `1.00` keeps its two
//! fractional digits and is numerically equal to, but distinguishable in
//! precision from, `1.0`. The ordering never round-trips through binary
//! floats.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An exact decimal: `coefficient * 10^exponent`.
///
/// The coefficient is not normalized, so trailing zeros written in the
/// source survive and count toward [`precision`](Decimal::precision).
#[derive(Debug, Clone, Copy)]
pub struct Decimal {
    coefficient: i128,
    exponent: i32,
}

impl Decimal {
    /// Create a decimal from its coefficient and exponent
    pub fn new(coefficient: i128, exponent: i32) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }

    /// The coefficient as written
    pub fn coefficient(&self) -> i128 {
        self.coefficient
    }

    /// The exponent as written
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Number of significant digits in the coefficient.
    ///
    /// `1.23` has precision 3, `1.00` has precision 3, `0.005` has
    /// precision 1. The zero coefficient counts as a single digit.
    pub fn precision(&self) -> usize {
        digit_count(self.coefficient.unsigned_abs())
    }

    /// True when the value is numerically zero, regardless of exponent
    pub fn is_zero(&self) -> bool {
        self.coefficient == 0
    }

    fn sign(&self) -> i8 {
        match self.coefficient.cmp(&0) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Exponent of the leading digit in scientific notation.
    ///
    /// Only meaningful for nonzero values: `123d0` and `1.23d2` both have
    /// adjusted exponent 2.
    fn adjusted_exponent(&self) -> i64 {
        self.exponent as i64 + digit_count(self.coefficient.unsigned_abs()) as i64 - 1
    }

    /// Compare the magnitudes of two nonzero decimals with equal adjusted
    /// exponents, digit by digit.
    fn cmp_aligned_magnitude(&self, other: &Decimal) -> Ordering {
        let a = self.coefficient.unsigned_abs().to_string();
        let b = other.coefficient.unsigned_abs().to_string();
        let width = a.len().max(b.len());
        let mut a_digits = a.bytes().chain(std::iter::repeat(b'0'));
        let mut b_digits = b.bytes().chain(std::iter::repeat(b'0'));
        for _ in 0..width {
            let da = a_digits.next().unwrap_or(b'0');
            let db = b_digits.next().unwrap_or(b'0');
            match da.cmp(&db) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (sa, sb) = (self.sign(), other.sign());
        if sa != sb {
            return sa.cmp(&sb);
        }
        if sa == 0 {
            return Ordering::Equal;
        }
        let magnitude = match self.adjusted_exponent().cmp(&other.adjusted_exponent()) {
            Ordering::Equal => self.cmp_aligned_magnitude(other),
            unequal => unequal,
        };
        if sa < 0 {
            magnitude.reverse()
        } else {
            magnitude
        }
    }
}

impl From<i128> for Decimal {
    fn from(value: i128) -> Self {
        Decimal::new(value, 0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficient < 0 {
            write!(f, "-")?;
        }
        let digits = self.coefficient.unsigned_abs().to_string();
        if self.exponent > 0 {
            return write!(f, "{}d{}", digits, self.exponent);
        }
        if self.exponent == 0 {
            return write!(f, "{}.", digits);
        }
        let scale = self.exponent.unsigned_abs() as usize;
        if scale >= digits.len() {
            write!(f, "0.")?;
            for _ in 0..(scale - digits.len()) {
                write!(f, "0")?;
            }
            write!(f, "{}", digits)
        } else {
            let split = digits.len() - scale;
            write!(f, "{}.{}", &digits[..split], &digits[split..])
        }
    }
}

impl FromStr for Decimal {
    type Err = Error;

    /// Parse the text forms `123.`, `1.23`, `-0.005`, and `12d3`
    fn from_str(text: &str) -> Result<Self> {
        let bad = || Error::invalid_decimal(format!("'{}' is not a decimal", text));
        let (mantissa, exponent_text) = match text.split_once(['d', 'D']) {
            Some((m, e)) => (m, Some(e)),
            None => (text, None),
        };
        let mut explicit_exponent: i32 = match exponent_text {
            Some(e) => e.parse().map_err(|_| bad())?,
            None => 0,
        };
        let (sign, unsigned) = match mantissa.strip_prefix('-') {
            Some(rest) => (-1i128, rest),
            None => (1i128, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };
        let (integral, fractional) = match unsigned.split_once('.') {
            Some((i, frac)) => (i, frac),
            None => (unsigned, ""),
        };
        if integral.is_empty() && fractional.is_empty() {
            return Err(bad());
        }
        if !integral.bytes().all(|b| b.is_ascii_digit())
            || !fractional.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(bad());
        }
        let mut coefficient: i128 = 0;
        for b in integral.bytes().chain(fractional.bytes()) {
            coefficient = coefficient
                .checked_mul(10)
                .and_then(|c| c.checked_add((b - b'0') as i128))
                .ok_or_else(|| {
                    Error::invalid_decimal(format!("'{}' overflows the coefficient", text))
                })?;
        }
        explicit_exponent = explicit_exponent
            .checked_sub(fractional.len() as i32)
            .ok_or_else(|| Error::invalid_decimal(format!("'{}' overflows the exponent", text)))?;
        Ok(Decimal::new(sign * coefficient, explicit_exponent))
    }
}

fn digit_count(mut magnitude: u128) -> usize {
    let mut count = 1;
    while magnitude >= 10 {
        magnitude /= 10;
        count += 1;
    }
    count
}
