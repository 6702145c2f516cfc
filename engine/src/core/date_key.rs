//! Canonical calendar keys for days, months and years.
//!
//! Keys are plain zero-padded strings (`YYYY-MM-DD`, `YYYY-MM`, `YYYY`), so
//! sorting keys of one granularity as strings sorts them chronologically. The
//! entry store keys its data by [`DayKey`], and every roll-up in this crate
//! walks real calendar days (via `time`) rather than trusting user-typed day
//! numbers.
//!
//! Minimal API
//! -----------
//! - [`parse`] a day key into its [`DayParts`]
//! - [`to_day_key`] / [`to_month_key`] build canonical keys
//! - [`convert`] truncates a key to a coarser [`Granularity`]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::error::{EngineError, Result};

const MAX_YEAR: i32 = 9999;

/// Calendar resolution of a key, ordered finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        })
    }
}

/// Numeric components of a [`DayKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayParts {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

// ---------------------------------------------------------------------------
// DayKey
// ---------------------------------------------------------------------------

/// A calendar day, `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(String);

impl DayKey {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        check_year(year)?;
        check_month(month)?;
        if !(1..=31).contains(&day) {
            return Err(EngineError::OutOfRange {
                field: "day",
                value: i64::from(day),
            });
        }
        Ok(Self(format!("{year:04}-{month:02}-{day:02}")))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        parse(raw).map(|_| Self(raw.to_string()))
    }

    pub fn from_date(date: Date) -> Result<Self> {
        Self::new(date.year(), date.month() as u8, date.day())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> i32 {
        digits(&self.0[0..4]) as i32
    }

    pub fn month(&self) -> u8 {
        digits(&self.0[5..7]) as u8
    }

    pub fn day(&self) -> u8 {
        digits(&self.0[8..10]) as u8
    }

    pub fn parts(&self) -> DayParts {
        DayParts {
            year: self.year(),
            month: self.month(),
            day: self.day(),
        }
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey(self.0[0..7].to_string())
    }

    pub fn year_key(&self) -> YearKey {
        YearKey(self.0[0..4].to_string())
    }

    /// Fails with `OutOfRange` if the day does not exist in its month
    /// (e.g. `2023-02-30`), since keys only bound the day to 1..=31.
    pub fn to_date(&self) -> Result<Date> {
        let month = to_month(self.month())?;
        Date::from_calendar_date(self.year(), month, self.day()).map_err(|_| {
            EngineError::OutOfRange {
                field: "day",
                value: i64::from(self.day()),
            }
        })
    }

    pub fn previous(&self) -> Result<Self> {
        let date = self.to_date()?;
        let prev = date.previous_day().ok_or(EngineError::OutOfRange {
            field: "year",
            value: i64::from(self.year()),
        })?;
        Self::from_date(prev)
    }

    pub fn next(&self) -> Result<Self> {
        let date = self.to_date()?;
        let next = date.next_day().ok_or(EngineError::OutOfRange {
            field: "year",
            value: i64::from(self.year()),
        })?;
        Self::from_date(next)
    }
}

// ---------------------------------------------------------------------------
// MonthKey
// ---------------------------------------------------------------------------

/// A calendar month, `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    pub fn new(year: i32, month: u8) -> Result<Self> {
        check_year(year)?;
        check_month(month)?;
        Ok(Self(format!("{year:04}-{month:02}")))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let malformed = || EngineError::MalformedKey(raw.to_string());
        let (year, month) = raw.split_once('-').ok_or_else(malformed)?;
        let _ = fixed_digits(year, 4).ok_or_else(malformed)?;
        let month = fixed_digits(month, 2).ok_or_else(malformed)?;
        if !(1..=12).contains(&month) {
            return Err(malformed());
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> i32 {
        digits(&self.0[0..4]) as i32
    }

    pub fn month(&self) -> u8 {
        digits(&self.0[5..7]) as u8
    }

    pub fn year_key(&self) -> YearKey {
        YearKey(self.0[0..4].to_string())
    }

    pub fn first_day(&self) -> DayKey {
        DayKey(format!("{}-01", self.0))
    }

    pub fn last_day(&self) -> DayKey {
        let last = days_in_month(self.year(), self.month()).unwrap_or(31);
        DayKey(format!("{}-{last:02}", self.0))
    }

    /// Every day of the month in calendar order.
    pub fn days(&self) -> Vec<DayKey> {
        let (year, month) = (self.year(), self.month());
        // A parsed key always holds a valid month, so the fallback is never taken.
        let last = days_in_month(year, month).unwrap_or(0);
        (1..=last)
            .map(|day| DayKey(format!("{year:04}-{month:02}-{day:02}")))
            .collect()
    }

    pub fn previous(&self) -> Result<Self> {
        match self.month() {
            1 => Self::new(self.year() - 1, 12),
            m => Self::new(self.year(), m - 1),
        }
    }

    pub fn next(&self) -> Result<Self> {
        match self.month() {
            12 => Self::new(self.year() + 1, 1),
            m => Self::new(self.year(), m + 1),
        }
    }
}

// ---------------------------------------------------------------------------
// YearKey
// ---------------------------------------------------------------------------

/// A calendar year, `YYYY`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearKey(String);

impl YearKey {
    pub fn new(year: i32) -> Result<Self> {
        check_year(year)?;
        Ok(Self(format!("{year:04}")))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        fixed_digits(raw, 4)
            .map(|_| Self(raw.to_string()))
            .ok_or_else(|| EngineError::MalformedKey(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> i32 {
        digits(&self.0) as i32
    }

    pub fn first_day(&self) -> DayKey {
        DayKey(format!("{}-01-01", self.0))
    }

    pub fn last_day(&self) -> DayKey {
        DayKey(format!("{}-12-31", self.0))
    }

    /// January through December of this year.
    pub fn months(&self) -> Vec<MonthKey> {
        (1..=12u8)
            .map(|month| MonthKey(format!("{}-{month:02}", self.0)))
            .collect()
    }

    pub fn previous(&self) -> Result<Self> {
        Self::new(self.year() - 1)
    }

    pub fn next(&self) -> Result<Self> {
        Self::new(self.year() + 1)
    }
}

// ---------------------------------------------------------------------------
// DateKey
// ---------------------------------------------------------------------------

/// Any of the three key granularities. Keys of the same granularity order
/// chronologically; keys of different granularities order day < month < year.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateKey {
    Day(DayKey),
    Month(MonthKey),
    Year(YearKey),
}

impl DateKey {
    /// Detects the granularity from the key's shape.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.len() {
            10 => DayKey::parse(raw).map(DateKey::Day),
            7 => MonthKey::parse(raw).map(DateKey::Month),
            4 => YearKey::parse(raw).map(DateKey::Year),
            _ => Err(EngineError::MalformedKey(raw.to_string())),
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            DateKey::Day(_) => Granularity::Day,
            DateKey::Month(_) => Granularity::Month,
            DateKey::Year(_) => Granularity::Year,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DateKey::Day(key) => key.as_str(),
            DateKey::Month(key) => key.as_str(),
            DateKey::Year(key) => key.as_str(),
        }
    }
}

impl From<DayKey> for DateKey {
    fn from(key: DayKey) -> Self {
        DateKey::Day(key)
    }
}

impl From<MonthKey> for DateKey {
    fn from(key: MonthKey) -> Self {
        DateKey::Month(key)
    }
}

impl From<YearKey> for DateKey {
    fn from(key: YearKey) -> Self {
        DateKey::Year(key)
    }
}

// ---------------------------------------------------------------------------
// Contract functions
// ---------------------------------------------------------------------------

/// Split a `YYYY-MM-DD` key into its components.
pub fn parse(raw: &str) -> Result<DayParts> {
    let malformed = || EngineError::MalformedKey(raw.to_string());
    let mut pieces = raw.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (pieces.next(), pieces.next(), pieces.next(), pieces.next())
    else {
        return Err(malformed());
    };

    let year = fixed_digits(year, 4).ok_or_else(malformed)?;
    let month = fixed_digits(month, 2).ok_or_else(malformed)?;
    let day = fixed_digits(day, 2).ok_or_else(malformed)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(malformed());
    }

    Ok(DayParts {
        year: year as i32,
        month: month as u8,
        day: day as u8,
    })
}

pub fn to_day_key(year: i32, month: u8, day: u8) -> Result<DayKey> {
    DayKey::new(year, month, day)
}

pub fn to_month_key(year: i32, month: u8) -> Result<MonthKey> {
    MonthKey::new(year, month)
}

/// Truncate `key` to `target`. Converting to the key's own granularity is a
/// no-op; converting to a finer one fails with `UnsupportedConversion`.
pub fn convert(key: &DateKey, target: Granularity) -> Result<DateKey> {
    let from = key.granularity();
    if target < from {
        return Err(EngineError::UnsupportedConversion { from, to: target });
    }

    Ok(match (key, target) {
        (DateKey::Day(day), Granularity::Month) => DateKey::Month(day.month_key()),
        (DateKey::Day(day), Granularity::Year) => DateKey::Year(day.year_key()),
        (DateKey::Month(month), Granularity::Year) => DateKey::Year(month.year_key()),
        _ => key.clone(),
    })
}

/// Number of days in `month` of `year`, leap years included.
pub fn days_in_month(year: i32, month: u8) -> Result<u8> {
    let month = to_month(month)?;
    (28..=31u8)
        .rev()
        .find(|day| Date::from_calendar_date(year, month, *day).is_ok())
        .ok_or(EngineError::OutOfRange {
            field: "year",
            value: i64::from(year),
        })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_year(year: i32) -> Result<()> {
    if (0..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(EngineError::OutOfRange {
            field: "year",
            value: i64::from(year),
        })
    }
}

fn check_month(month: u8) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(EngineError::OutOfRange {
            field: "month",
            value: i64::from(month),
        })
    }
}

fn to_month(month: u8) -> Result<Month> {
    Month::try_from(month).map_err(|_| EngineError::OutOfRange {
        field: "month",
        value: i64::from(month),
    })
}

/// `raw` as a number if it is exactly `width` ASCII digits.
fn fixed_digits(raw: &str, width: usize) -> Option<u32> {
    if raw.len() == width && raw.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits(raw))
    } else {
        None
    }
}

// Only called on slices already known to be ASCII digits.
fn digits(raw: &str) -> u32 {
    raw.bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b.wrapping_sub(b'0')))
}

macro_rules! string_key_impls {
    ($($key:ident),+) => {$(
        impl fmt::Display for $key {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $key {
            type Err = EngineError;

            fn from_str(raw: &str) -> Result<Self> {
                Self::parse(raw)
            }
        }

        impl TryFrom<String> for $key {
            type Error = EngineError;

            fn try_from(raw: String) -> Result<Self> {
                Self::parse(&raw)
            }
        }

        impl From<$key> for String {
            fn from(key: $key) -> String {
                key.0
            }
        }

        impl AsRef<str> for $key {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    )+};
}

string_key_impls!(DayKey, MonthKey, YearKey);

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateKey {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self> {
        Self::parse(raw)
    }
}
