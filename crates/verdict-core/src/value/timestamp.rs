//! Timestamps that remember how precisely they were written
//!
//! A [`Timestamp`] couples a calendar instant (validated through `chrono`)
//! with the granularity it was expressed at: `2020-01-01` and
//! `2020-01-01T00:00Z` denote the same instant but carry different
//! [`Precision`]. Constraints over *how precisely* a timestamp is written
//! use [`Timestamp::precision_class`], which projects the granularity into
//! the totally ordered [`PrecisionClass`].
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Structural granularity of a timestamp as written
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    Year,
    Month,
    Day,
    /// Hour and minute are always written together
    Minute,
    Second,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Precision::Year => "year",
            Precision::Month => "month",
            Precision::Day => "day",
            Precision::Minute => "minute",
            Precision::Second => "second",
        };
        write!(f, "{}", name)
    }
}

/// The comparable rank of a timestamp's precision.
///
/// Coarser granularity always ranks strictly below finer granularity, and
/// among second-precision timestamps more significant fractional digits
/// rank strictly higher. The rank is derived during comparison and never
/// stored on the timestamp itself.
///
/// Encoding: year −4, month −3, day −2, minute −1, second 0, and `d` for
/// d > 0 significant fractional-second digits. The named fractional
/// keywords land on that same scale (millisecond 3, microsecond 6,
/// nanosecond 9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrecisionClass {
    rank: i8,
}

impl PrecisionClass {
    pub const YEAR: PrecisionClass = PrecisionClass { rank: -4 };
    pub const MONTH: PrecisionClass = PrecisionClass { rank: -3 };
    pub const DAY: PrecisionClass = PrecisionClass { rank: -2 };
    pub const MINUTE: PrecisionClass = PrecisionClass { rank: -1 };
    pub const SECOND: PrecisionClass = PrecisionClass { rank: 0 };
    pub const MILLISECOND: PrecisionClass = PrecisionClass { rank: 3 };
    pub const MICROSECOND: PrecisionClass = PrecisionClass { rank: 6 };
    pub const NANOSECOND: PrecisionClass = PrecisionClass { rank: 9 };

    /// Rank of a second-precision timestamp with `digits` significant
    /// fractional digits (0 collapses to [`SECOND`](Self::SECOND)).
    /// `digits` beyond nanosecond resolution are not representable and
    /// are rejected at timestamp construction, so 0..=9 covers all inputs.
    pub fn with_fractional_digits(digits: u8) -> Self {
        PrecisionClass { rank: digits as i8 }
    }

    /// Parse a precision keyword as used in schema range bounds
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "year" => Some(Self::YEAR),
            "month" => Some(Self::MONTH),
            "day" => Some(Self::DAY),
            "minute" => Some(Self::MINUTE),
            "second" => Some(Self::SECOND),
            "millisecond" => Some(Self::MILLISECOND),
            "microsecond" => Some(Self::MICROSECOND),
            "nanosecond" => Some(Self::NANOSECOND),
            _ => None,
        }
    }

    fn keyword(&self) -> Option<&'static str> {
        match self.rank {
            -4 => Some("year"),
            -3 => Some("month"),
            -2 => Some("day"),
            -1 => Some("minute"),
            0 => Some("second"),
            3 => Some("millisecond"),
            6 => Some("microsecond"),
            9 => Some("nanosecond"),
            _ => None,
        }
    }
}

impl fmt::Display for PrecisionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.keyword() {
            Some(keyword) => write!(f, "{}", keyword),
            None => write!(f, "second with {} fractional digits", self.rank),
        }
    }
}

/// A calendar instant plus the granularity it was written at.
///
/// Ordering and equality compare the UTC instant only; precision and
/// fractional digit count never participate. An unknown local offset
/// (written `-00:00`) compares as UTC.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    datetime: NaiveDateTime,
    offset: Option<FixedOffset>,
    precision: Precision,
    fractional_digits: u8,
}

impl Timestamp {
    /// Start building a timestamp from its year
    pub fn builder(year: i32) -> TimestampBuilder {
        TimestampBuilder {
            year,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
            nanoseconds: 0,
            fractional_digits: 0,
            offset_minutes: None,
        }
    }

    /// Parse one of the accepted text forms.
    ///
    /// `2020T`, `2020-01T`, `2020-01-01`, `2020-01-01T10:00Z`,
    /// `2020-01-01T10:00:05.500-08:00`. An offset is required once a
    /// time of day is present; `-00:00` denotes an unknown local offset.
    pub fn parse(text: &str) -> Result<Self> {
        // Compiled once; the document reader hits this for every
        // timestamp-shaped token
        static SHAPE: OnceLock<regex::Regex> = OnceLock::new();
        let shape = SHAPE.get_or_init(|| {
            regex::Regex::new(
                r"(?x)^(?P<year>\d{4})
                  (?: -(?P<month>\d{2})
                      (?: -(?P<day>\d{2})
                          (?: T(?P<hour>\d{2}):(?P<minute>\d{2})
                              (?: :(?P<second>\d{2})(?P<fraction>\.\d{1,9})? )?
                              (?P<offset>Z|[+-]\d{2}:\d{2})
                          | T
                          )?
                      | T
                      )
                  | T
                  )$",
            )
            .expect("timestamp shape pattern is valid")
        });
        let captures = shape.captures(text).ok_or_else(|| {
            Error::invalid_timestamp(format!("'{}' does not match any timestamp form", text))
        })?;

        let component = |name: &str| -> Option<u32> {
            captures
                .name(name)
                .map(|m| m.as_str().parse().expect("digits-only capture"))
        };
        let mut builder = Timestamp::builder(
            captures["year"].parse().expect("digits-only capture"),
        );
        if let Some(month) = component("month") {
            builder = builder.month(month);
        }
        if let Some(day) = component("day") {
            builder = builder.day(day);
        }
        if let (Some(hour), Some(minute)) = (component("hour"), component("minute")) {
            builder = builder.hour_and_minute(hour, minute);
        }
        if let Some(second) = component("second") {
            builder = builder.second(second);
        }
        if let Some(fraction) = captures.name("fraction") {
            let digits = &fraction.as_str()[1..];
            let count = digits.len() as u8;
            let value: u32 = digits.parse().expect("digits-only capture");
            builder = builder.fraction(value * 10u32.pow(9 - count as u32), count);
        }
        if let Some(offset) = captures.name("offset") {
            match parse_offset_minutes(offset.as_str()) {
                Some(minutes) => builder = builder.offset_minutes(minutes),
                None => {} // -00:00, the unknown local offset
            }
        }
        builder.build()
    }

    /// Granularity this timestamp was written at
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Number of significant fractional-second digits (0 unless written)
    pub fn fractional_digits(&self) -> u8 {
        self.fractional_digits
    }

    /// Offset from UTC in minutes, `None` when the offset is unknown
    pub fn offset_minutes(&self) -> Option<i32> {
        self.offset.map(|o| o.local_minus_utc() / 60)
    }

    /// Project this timestamp onto the precision ordering (the
    /// classification used by precision constraints)
    pub fn precision_class(&self) -> PrecisionClass {
        match self.precision {
            Precision::Year => PrecisionClass::YEAR,
            Precision::Month => PrecisionClass::MONTH,
            Precision::Day => PrecisionClass::DAY,
            Precision::Minute => PrecisionClass::MINUTE,
            Precision::Second => PrecisionClass::with_fractional_digits(self.fractional_digits),
        }
    }

    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    pub fn month(&self) -> u32 {
        self.datetime.month()
    }

    pub fn day(&self) -> u32 {
        self.datetime.day()
    }

    /// The instant in UTC; an unknown offset is treated as UTC
    fn utc_instant(&self) -> NaiveDateTime {
        let offset_seconds = self.offset.map_or(0, |o| o.local_minus_utc());
        self.datetime - chrono::Duration::seconds(offset_seconds as i64)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.utc_instant() == other.utc_instant()
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc_instant().cmp(&other.utc_instant())
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Timestamp::parse(text)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.datetime;
        match self.precision {
            Precision::Year => write!(f, "{:04}T", d.year()),
            Precision::Month => write!(f, "{:04}-{:02}T", d.year(), d.month()),
            Precision::Day => write!(f, "{:04}-{:02}-{:02}", d.year(), d.month(), d.day()),
            Precision::Minute => {
                write!(
                    f,
                    "{:04}-{:02}-{:02}T{:02}:{:02}",
                    d.year(),
                    d.month(),
                    d.day(),
                    d.hour(),
                    d.minute()
                )?;
                write_offset(f, self.offset)
            }
            Precision::Second => {
                write!(
                    f,
                    "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                    d.year(),
                    d.month(),
                    d.day(),
                    d.hour(),
                    d.minute(),
                    d.second()
                )?;
                if self.fractional_digits > 0 {
                    let nanos = format!("{:09}", d.nanosecond());
                    write!(f, ".{}", &nanos[..self.fractional_digits as usize])?;
                }
                write_offset(f, self.offset)
            }
        }
    }
}

fn write_offset(f: &mut fmt::Formatter<'_>, offset: Option<FixedOffset>) -> fmt::Result {
    match offset {
        None => write!(f, "-00:00"),
        Some(o) if o.local_minus_utc() == 0 => write!(f, "Z"),
        Some(o) => {
            let minutes = o.local_minus_utc() / 60;
            let sign = if minutes < 0 { '-' } else { '+' };
            write!(f, "{}{:02}:{:02}", sign, minutes.abs() / 60, minutes.abs() % 60)
        }
    }
}

fn parse_offset_minutes(text: &str) -> Option<i32> {
    if text == "Z" {
        return Some(0);
    }
    let (sign, rest) = match text.split_at(1) {
        ("-", rest) => (-1, rest),
        (_, rest) => (1, rest),
    };
    let (hours, minutes) = rest.split_once(':').expect("offset shape checked by regex");
    let total = hours.parse::<i32>().expect("digits-only capture") * 60
        + minutes.parse::<i32>().expect("digits-only capture");
    if sign < 0 && total == 0 {
        None // -00:00 means the local offset is unknown
    } else {
        Some(sign * total)
    }
}

/// Builds a [`Timestamp`] one component at a time; precision is derived
/// from the deepest component supplied.
#[derive(Debug, Clone)]
pub struct TimestampBuilder {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    nanoseconds: u32,
    fractional_digits: u8,
    offset_minutes: Option<i32>,
}

impl TimestampBuilder {
    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    /// Hour and minute are a single unit; one is never written without
    /// the other
    pub fn hour_and_minute(mut self, hour: u32, minute: u32) -> Self {
        self.hour = Some(hour);
        self.minute = Some(minute);
        self
    }

    pub fn second(mut self, second: u32) -> Self {
        self.second = Some(second);
        self
    }

    /// Fractional seconds as nanoseconds plus the number of significant
    /// digits that were written (1..=9)
    pub fn fraction(mut self, nanoseconds: u32, digits: u8) -> Self {
        self.nanoseconds = nanoseconds;
        self.fractional_digits = digits;
        self
    }

    /// Known offset from UTC in minutes; leave unset for an unknown
    /// local offset
    pub fn offset_minutes(mut self, minutes: i32) -> Self {
        self.offset_minutes = Some(minutes);
        self
    }

    pub fn build(self) -> Result<Timestamp> {
        let precision = self.derive_precision()?;
        if self.fractional_digits > 9 {
            return Err(Error::invalid_timestamp(
                "fractional seconds are limited to 9 digits",
            ));
        }
        if self.fractional_digits == 0 && self.nanoseconds > 0 {
            return Err(Error::invalid_timestamp(
                "fractional seconds require a digit count",
            ));
        }
        if precision < Precision::Minute && self.offset_minutes.is_some() {
            return Err(Error::invalid_timestamp(
                "an offset requires at least minute precision",
            ));
        }

        let date = NaiveDate::from_ymd_opt(
            self.year,
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
        )
        .ok_or_else(|| {
            Error::invalid_timestamp(format!(
                "{:04}-{:02}-{:02} is not a valid calendar date",
                self.year,
                self.month.unwrap_or(1),
                self.day.unwrap_or(1)
            ))
        })?;
        let time = NaiveTime::from_hms_nano_opt(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.nanoseconds,
        )
        .ok_or_else(|| {
            Error::invalid_timestamp(format!(
                "{:02}:{:02}:{:02} is not a valid time of day",
                self.hour.unwrap_or(0),
                self.minute.unwrap_or(0),
                self.second.unwrap_or(0)
            ))
        })?;
        let offset = match self.offset_minutes {
            None => None,
            Some(minutes) => Some(FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
                Error::invalid_timestamp(format!("offset of {} minutes is out of range", minutes))
            })?),
        };

        Ok(Timestamp {
            datetime: NaiveDateTime::new(date, time),
            offset,
            precision,
            fractional_digits: self.fractional_digits,
        })
    }

    fn derive_precision(&self) -> Result<Precision> {
        let gap = |message: &str| Err(Error::invalid_timestamp(message.to_string()));
        match (self.month, self.day, self.hour, self.second) {
            (None, None, None, None) => Ok(Precision::Year),
            (Some(_), None, None, None) => Ok(Precision::Month),
            (Some(_), Some(_), None, None) => Ok(Precision::Day),
            (Some(_), Some(_), Some(_), None) => Ok(Precision::Minute),
            (Some(_), Some(_), Some(_), Some(_)) => Ok(Precision::Second),
            (None, Some(_), _, _) => gap("a day requires a month"),
            (_, None, Some(_), _) => gap("a time of day requires a full date"),
            (_, _, None, Some(_)) => gap("seconds require an hour and minute"),
        }
    }
}
