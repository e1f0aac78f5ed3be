//! # b2b-time
//!
//! Date, holiday, and working-day calendar types.
//!
//! The [`Calendar`] trait provides the business-day operations used across
//! the workshop tooling: counting business days in a closed range, adding
//! business days to a date, and normalising a date onto the last business
//! day on or before it.
//!
//! ```
//! use b2b_time::{Calendar, Date, Italy};
//!
//! let cal = Italy::new();
//! let d = |y, m, dd| Date::from_ymd(y, m, dd).unwrap();
//! assert_eq!(cal.count_business_days(d(2024, 1, 1), d(2024, 1, 7)), 4);
//! assert_eq!(cal.add_business_days(d(2024, 12, 23), 5).unwrap(), d(2025, 1, 2));
//! assert_eq!(cal.last_business_day_on_or_before(d(2024, 4, 1)).unwrap(), d(2024, 3, 29));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and the weekends-only calendar.
pub mod calendar;

/// Concrete calendar implementations.
pub mod calendars;

/// `Date` type.
pub mod date;

/// Public holidays and the Easter computus.
pub mod holidays;

/// Days of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, WeekendsOnly};
pub use calendars::italy::{HolidayYearMode, Italy};
pub use date::Date;
pub use holidays::{easter_monday, easter_sunday, holidays_for_year, Holiday, HolidaySet};
pub use weekday::Weekday;
