//! Timezone-free calendar dates.
//!
//! # Responsibility
//! - Represent event dates as plain `year-month-day` triples.
//! - Parse and render the canonical `YYYY-MM-DD` storage form.
//! - Provide proleptic Gregorian month-length and weekday arithmetic.
//!
//! # Invariants
//! - Equality and ordering are structural; no timezone is ever consulted.
//! - `month` is 1-based (`1..=12`) and `day` lies within that month.
//! - `Display` output parses back to the same value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d{4,})-(\d{2})-(\d{2})$").expect("valid date regex"));

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Error returned for malformed or out-of-range date input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Input does not match `YYYY-MM-DD`.
    Malformed(String),
    /// Month component outside `1..=12`.
    MonthOutOfRange(u32),
    /// Day component is zero or past the end of its month.
    DayOutOfRange { year: i32, month: u32, day: u32 },
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "expected YYYY-MM-DD date, got `{value}`"),
            Self::MonthOutOfRange(month) => write!(f, "month {month} is outside 1..=12"),
            Self::DayOutOfRange { year, month, day } => {
                write!(f, "day {day} does not exist in {year}-{month:02}")
            }
        }
    }
}

impl Error for DateParseError {}

/// Calendar date compared by value, stored as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventDate {
    year: i32,
    month: u32,
    day: u32,
}

impl EventDate {
    /// Creates a date from a year, a 1-based month and a 1-based day.
    ///
    /// # Errors
    /// - `MonthOutOfRange` when `month` is not in `1..=12`.
    /// - `DayOutOfRange` when `day` is zero or past the month end.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateParseError> {
        if !(1..=12).contains(&month) {
            return Err(DateParseError::MonthOutOfRange(month));
        }
        if day == 0 || day > days_in_month(year, month - 1) {
            return Err(DateParseError::DayOutOfRange { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Parses the canonical `YYYY-MM-DD` form.
    ///
    /// Surrounding whitespace is ignored. Years may have more than four
    /// digits and may be negative (`-0044-03-15`).
    pub fn parse(value: &str) -> Result<Self, DateParseError> {
        let trimmed = value.trim();
        let malformed = || DateParseError::Malformed(trimmed.to_string());
        let caps = DATE_RE.captures(trimmed).ok_or_else(malformed)?;

        let year = caps[1].parse::<i32>().map_err(|_| malformed())?;
        let month = caps[2].parse::<u32>().map_err(|_| malformed())?;
        let day = caps[3].parse::<u32>().map_err(|_| malformed())?;
        Self::new(year, month, day)
    }

    /// Builds a date from components already known to be valid.
    pub(crate) fn from_trusted(year: i32, month: u32, day: u32) -> Self {
        debug_assert!(Self::new(year, month, day).is_ok());
        Self { year, month, day }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Zero-based month, as used by grid and navigation APIs.
    pub fn month0(&self) -> u32 {
        self.month - 1
    }

    /// Weekday index with `0 = Sunday`.
    pub fn weekday(&self) -> u32 {
        weekday(self.year, self.month0(), self.day)
    }

    /// Returns whether this date falls in `year` / zero-based `month0`.
    pub fn is_in_month(&self, year: i32, month0: u32) -> bool {
        self.year == year && self.month0() == month0
    }

    /// Locale-independent long label, e.g. `Monday, March 4, 2024`.
    pub fn long_label(&self) -> String {
        format!(
            "{}, {} {}, {}",
            WEEKDAY_NAMES[self.weekday() as usize],
            MONTH_NAMES[self.month0() as usize],
            self.day,
            self.year
        )
    }
}

impl Display for EventDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

impl Serialize for EventDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Gregorian leap-year rule, applied proleptically to every year.
pub fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Number of days in zero-based `month0` of `year`.
///
/// `month0` values past 11 are reduced modulo 12 so callers computing
/// "next month" never index out of range.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 % 12 {
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Weekday of `year` / zero-based `month0` / `day`, with `0 = Sunday`.
pub fn weekday(year: i32, month0: u32, day: u32) -> u32 {
    let days = days_from_civil(i64::from(year), month0 + 1, day);
    // 1970-01-01 was a Thursday.
    (days + 4).rem_euclid(7) as u32
}

/// English month name for zero-based `month0`.
pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES[(month0 % 12) as usize]
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    let day = i64::from(day);
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, is_leap_year, month_name, weekday, DateParseError, EventDate};

    #[test]
    fn leap_year_rule_handles_centuries() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn days_in_month_covers_every_month() {
        let lengths: Vec<u32> = (0..12).map(|m| days_in_month(2023, m)).collect();
        assert_eq!(lengths, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn weekday_matches_known_dates() {
        assert_eq!(weekday(1970, 0, 1), 4);
        assert_eq!(weekday(2024, 0, 1), 1);
        assert_eq!(weekday(2024, 1, 1), 4);
        assert_eq!(weekday(2023, 11, 31), 0);
        assert_eq!(weekday(2000, 1, 29), 2);
        assert_eq!(weekday(1600, 0, 1), 6);
    }

    #[test]
    fn parse_accepts_canonical_form_and_trims() {
        let date = EventDate::parse(" 2024-03-05 ").expect("date should parse");
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 5));
        assert_eq!(date.month0(), 2);
        assert_eq!(date.to_string(), "2024-03-05");
    }

    #[test]
    fn parse_rejects_unpadded_and_out_of_range_values() {
        assert!(matches!(
            EventDate::parse("2024-3-5"),
            Err(DateParseError::Malformed(_))
        ));
        assert!(matches!(
            EventDate::parse("2024-03-05T00:00:00Z"),
            Err(DateParseError::Malformed(_))
        ));
        assert_eq!(
            EventDate::parse("2024-13-01"),
            Err(DateParseError::MonthOutOfRange(13))
        );
        assert_eq!(
            EventDate::parse("2023-02-29"),
            Err(DateParseError::DayOutOfRange {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(EventDate::parse("2024-02-29").is_ok());
    }

    #[test]
    fn negative_and_wide_years_render_and_parse_back() {
        let bc = EventDate::new(-44, 3, 15).expect("valid date");
        assert_eq!(bc.to_string(), "-0044-03-15");
        assert_eq!(EventDate::parse("-0044-03-15"), Ok(bc));

        let far = EventDate::new(12_345, 1, 2).expect("valid date");
        assert_eq!(far.to_string(), "12345-01-02");
        assert_eq!(EventDate::parse("12345-01-02"), Ok(far));
    }

    #[test]
    fn ordering_is_structural() {
        let a = EventDate::new(2023, 12, 31).expect("valid date");
        let b = EventDate::new(2024, 1, 1).expect("valid date");
        assert!(a < b);
    }

    #[test]
    fn long_label_is_locale_independent() {
        let date = EventDate::new(2024, 3, 4).expect("valid date");
        assert_eq!(date.long_label(), "Monday, March 4, 2024");
        assert_eq!(month_name(11), "December");
    }

    #[test]
    fn serde_uses_string_form() {
        let date = EventDate::new(2024, 7, 9).expect("valid date");
        let json = serde_json::to_string(&date).expect("serialize");
        assert_eq!(json, "\"2024-07-09\"");
        let back: EventDate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, date);
        assert!(serde_json::from_str::<EventDate>("\"07/09/2024\"").is_err());
    }
}
