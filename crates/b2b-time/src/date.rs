//! `Date` type.
//!
//! Dates are stored as a serial number of days since an epoch, so that day
//! arithmetic is a plain integer addition.
//!
//! # Serial number convention
//! * Serial 1 = January 1, 1900 (a Monday).
//! * The valid date range is 1900-01-01 to 2199-12-31.
//!
//! At the application boundary dates travel as `DD/MM/YYYY` strings; see
//! [`Date::parse_dmy`] and [`Date::to_dmy_string`].

use std::str::FromStr;

use b2b_core::errors::{Error, Result};
use b2b_core::utilities::data_parsers::{parse_date_slash, parse_iso_date};
use b2b_core::Settings;
use chrono::{Datelike, NaiveDate};

use crate::weekday::Weekday;

/// A calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

impl Date {
    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    pub fn from_serial(serial: i32) -> Result<Self> {
        let d = Date(serial);
        if d < Self::MIN || d > Self::MAX {
            return Err(Error::Date(format!(
                "serial {serial} out of range [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(d)
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1900..=2199).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [1900, 2199]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    /// Parse a `DD/MM/YYYY` string (one-digit day and month are accepted).
    ///
    /// ```
    /// use b2b_time::Date;
    /// let d = Date::parse_dmy("29/03/2024").unwrap();
    /// assert_eq!(d, Date::from_ymd(2024, 3, 29).unwrap());
    /// assert!(Date::parse_dmy("30/02/2024").is_err());
    /// ```
    pub fn parse_dmy(s: &str) -> Result<Self> {
        const EXPECTED: &str = "a DD/MM/YYYY date";
        let parse_err = || Error::Parse {
            input: s.to_string(),
            expected: EXPECTED,
        };
        let (y, m, d) = parse_date_slash(s).ok_or_else(parse_err)?;
        Date::from_ymd(y, m, d).map_err(|_| parse_err())
    }

    /// Parse a `YYYY-MM-DD` string, optionally followed by a time component.
    pub fn parse_iso(s: &str) -> Result<Self> {
        const EXPECTED: &str = "a YYYY-MM-DD date";
        let parse_err = || Error::Parse {
            input: s.to_string(),
            expected: EXPECTED,
        };
        let (y, m, d) = parse_iso_date(s).ok_or_else(parse_err)?;
        Date::from_ymd(y, m, d).map_err(|_| parse_err())
    }

    /// Today's date according to the local system clock.
    pub fn today() -> Result<Self> {
        Date::try_from(chrono::Local::now().date_naive())
    }

    /// The evaluation date: the [`Settings`] override if one is set,
    /// otherwise [`Date::today`].
    pub fn evaluation_date() -> Result<Self> {
        match Settings::instance().evaluation_date_serial() {
            Some(serial) => Date::from_serial(serial),
            None => Date::today(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// Return the month number (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return `(year, month, day)`.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.0)
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // Serial 1 (1900-01-01) is a Monday, ordinal 1.
        let w = ((self.0 - 1).rem_euclid(7) + 1) as u8;
        Weekday::from_ordinal(w).unwrap_or(Weekday::Monday)
    }

    /// Return `true` on Saturdays and Sundays.
    pub fn is_weekend(&self) -> bool {
        self.weekday().is_weekend()
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` calendar days.  Returns an error if the result is out
    /// of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self.0.checked_add(n).ok_or_else(|| {
            Error::Date(format!("date arithmetic: {self:?} + {n} overflows"))
        })?;
        Date::from_serial(serial)
    }

    /// The following calendar day, or `None` past [`Date::MAX`].
    pub fn succ(self) -> Option<Self> {
        (self < Self::MAX).then(|| Date(self.0 + 1))
    }

    /// The preceding calendar day, or `None` before [`Date::MIN`].
    pub fn pred(self) -> Option<Self> {
        (self > Self::MIN).then(|| Date(self.0 - 1))
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the first day of the month containing this date.
    pub fn start_of_month(self) -> Self {
        let (y, m, _) = ymd_from_serial(self.0);
        Date(serial_from_ymd(y, m, 1))
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = ymd_from_serial(self.0);
        let last = days_in_month(y, m);
        Date(serial_from_ymd(y, m, last))
    }

    /// Return `true` if this date falls in `year`/`month`.
    pub fn is_in_month(self, year: u16, month: u8) -> bool {
        let (y, m, _) = ymd_from_serial(self.0);
        y == year && m == month
    }

    /// Iterate over every calendar day in `[self, end]`.  Empty if
    /// `end < self`.
    pub fn range_inclusive(self, end: Date) -> impl Iterator<Item = Date> {
        (self.0..=end.0).map(Date)
    }

    // ── Formatting ────────────────────────────────────────────────────────────

    /// Format as `DD/MM/YYYY`.
    pub fn to_dmy_string(self) -> String {
        let (y, m, d) = ymd_from_serial(self.0);
        format!("{d:02}/{m:02}/{y:04}")
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl FromStr for Date {
    type Err = Error;

    /// Parses the `DD/MM/YYYY` boundary format.
    fn from_str(s: &str) -> Result<Self> {
        Date::parse_dmy(s)
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = Error;

    fn try_from(d: NaiveDate) -> Result<Self> {
        let year = u16::try_from(d.year())
            .map_err(|_| Error::Date(format!("year {} out of range", d.year())))?;
        Date::from_ymd(year, d.month() as u8, d.day() as u8)
    }
}

impl From<Date> for NaiveDate {
    fn from(d: Date) -> NaiveDate {
        let (y, m, day) = d.ymd();
        // Every `Date` is a valid proleptic Gregorian date within chrono's range.
        NaiveDate::from_ymd_opt(y as i32, m as u32, day as u32).unwrap_or_default()
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    /// Serialises as the `DD/MM/YYYY` boundary format.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_dmy_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Date::parse_dmy(&s).map_err(serde::de::Error::custom)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_dmy_string())
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Convert (year, month, day) to a serial number.
///
/// Serial 1 = 1900-01-01.  1900 is not a leap year.
fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let y = year as i32;
    let mut serial = (y - 1900) * 365;
    // Leap days in [1900, year): 1900 itself does not contribute.
    let py = y - 1;
    serial += (py / 4 - py / 100 + py / 400) - (1899 / 4 - 1899 / 100 + 1899 / 400);
    serial += MONTH_OFFSET[month as usize - 1] as i32;
    if month > 2 && is_leap_year(year) {
        serial += 1;
    }
    serial + day as i32
}

/// Decompose a serial number into (year, month, day).
fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let mut y = (serial / 366 + 1900) as u16;
    while serial >= serial_from_ymd(y + 1, 1, 1) {
        y += 1;
    }
    let mut remaining = serial - serial_from_ymd(y, 1, 1) + 1;
    let mut m = 1u8;
    loop {
        let days = days_in_month(y, m) as i32;
        if remaining <= days {
            break;
        }
        remaining -= days;
        m += 1;
    }
    (y, m, remaining as u8)
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// ── Tests ─────────────────────────────────────────────────────────────────────
