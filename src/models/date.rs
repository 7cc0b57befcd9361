use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{RatesError, Result};

// ---------------------------------------------------------------------------
// Date: Calendar date used as the lookup key of every rates record
// ---------------------------------------------------------------------------

/// A calendar date without a time-of-day component.
///
/// Ordering is calendrical. The canonical string form is `YYYY-MM-DD`, used
/// by both [`Display`](fmt::Display) and [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Create a date from its components, failing on impossible dates
    /// (e.g. February 30th).
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| RatesError::DateParse {
                input: format!("{year:04}-{month:02}-{day:02}"),
                reason: "no such calendar date".to_string(),
            })
    }

    pub const fn from_naive(date: NaiveDate) -> Self {
        Date(date)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Shift the date by a signed number of days.
    ///
    /// Saturates at chrono's supported range; the ECB dataset never comes
    /// anywhere near it.
    pub fn add_days(&self, days: i64) -> Self {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(magnitude)
        } else {
            self.0.checked_sub_days(magnitude)
        };
        Date(shifted.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN }))
    }

    /// Whole days from `other` to `self` (positive when `self` is later).
    pub fn days_since(&self, other: &Date) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for Date {
    type Err = RatesError;

    /// Parse a strictly `YYYY-MM-DD` string. Unpadded components such as
    /// `2004-2-15` are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(RatesError::DateParse {
                input: s.to_string(),
                reason: "expected YYYY-MM-DD".to_string(),
            });
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| RatesError::DateParse {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
