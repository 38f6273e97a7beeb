//! Calendar dates without a time component.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseScalarError;

/// A calendar date, written `YYYY-MM-DD` on the wire.
///
/// The default value is `1970-01-01`.
///
/// # Example
///
/// ```
/// use bindery_core::Date;
///
/// let date: Date = "2021-11-01".parse().unwrap();
/// assert_eq!(date.year(), 2021);
/// assert_eq!(date.to_string(), "2021-11-01");
/// assert!("2021-11-1".parse::<Date>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Date(NaiveDate);

impl Date {
    /// `strftime` pattern of the wire format.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Creates a date from its components, if they form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses a strict `YYYY-MM-DD` string.
    ///
    /// chrono alone would accept single-digit months and signed years, so
    /// the shape is checked first.
    pub fn parse(s: &str) -> Result<Self, ParseScalarError> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(ParseScalarError::Date(s.to_string()));
        }

        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| ParseScalarError::Date(s.to_string()))
    }

    /// Returns the year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day of month (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the underlying chrono date.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl FromStr for Date {
    type Err = ParseScalarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let date = Date::parse("2024-02-29").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 29));
    }

    #[test]
    fn test_parse_rejects_invalid_calendar_day() {
        assert!(Date::parse("2023-02-29").is_err());
        assert!(Date::parse("2023-13-01").is_err());
    }

    #[test]
    fn test_parse_rejects_loose_shapes() {
        for input in ["2023-1-01", "23-01-01", "2023/01/01", "+2023-01-01", "", "2023-01-01T00:00:00Z"] {
            assert!(Date::parse(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn test_default_is_epoch() {
        assert_eq!(Date::default().to_string(), "1970-01-01");
    }

    #[test]
    fn test_serde_uses_wire_format() {
        let date = Date::from_ymd(2021, 11, 1).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2021-11-01\"");

        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
        assert!(serde_json::from_str::<Date>("\"yesterday\"").is_err());
    }
}
