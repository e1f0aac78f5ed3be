//! `Calendar` trait and the weekends-only calendar.
//!
//! A calendar knows which dates are holidays.  The business-day operations
//! are default methods built on that, so a concrete calendar only has to
//! describe its holidays.

use b2b_core::errors::{Error, Result};
use b2b_core::BusinessDays;

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;

/// A working-day calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"Italy"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a public holiday in this calendar.
    ///
    /// Weekends are reported by [`Calendar::is_weekend`], not here.
    fn is_holiday(&self, date: Date) -> bool;

    /// Return `true` if `date` is a weekend according to this calendar.
    fn is_weekend(&self, date: Date) -> bool {
        date.is_weekend()
    }

    /// Return `true` if `date` is neither a weekend nor a holiday.
    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Adjust `date` according to the given business-day convention.
    ///
    /// # Errors
    /// Returns [`Error::Date`] if the search leaves the supported date range.
    fn adjust(&self, mut date: Date, convention: BusinessDayConvention) -> Result<Date> {
        let step: fn(Date) -> Option<Date> = match convention {
            BusinessDayConvention::Unadjusted => return Ok(date),
            BusinessDayConvention::Following => Date::succ,
            BusinessDayConvention::Preceding => Date::pred,
        };
        while !self.is_business_day(date) {
            date = step(date).ok_or_else(|| {
                Error::Date(format!(
                    "no business day within range when adjusting {date:?} ({convention})"
                ))
            })?;
        }
        Ok(date)
    }

    /// The last business day on or before `date` (possibly `date` itself).
    fn last_business_day_on_or_before(&self, date: Date) -> Result<Date> {
        self.adjust(date, BusinessDayConvention::Preceding)
    }

    /// Count the business days in the closed range `[start, end]`.
    ///
    /// Both endpoints are included when they are business days.  Returns 0
    /// when `start > end`.
    fn count_business_days(&self, start: Date, end: Date) -> BusinessDays {
        start
            .range_inclusive(end)
            .filter(|&d| self.is_business_day(d))
            .count() as BusinessDays
    }

    /// The `count`-th business day strictly after `start`.
    ///
    /// `start` itself is never counted; `count == 0` returns `start`
    /// unchanged.
    ///
    /// # Errors
    /// Returns [`Error::Date`] if the result would fall after [`Date::MAX`].
    fn add_business_days(&self, start: Date, count: BusinessDays) -> Result<Date> {
        let mut date = start;
        let mut added = 0;
        while added < count {
            date = date.succ().ok_or_else(|| {
                Error::Date(format!(
                    "{start:?} + {count} business days is past the supported range"
                ))
            })?;
            if self.is_business_day(date) {
                added += 1;
            }
        }
        Ok(date)
    }

    /// Number of business days in `year`/`month`.
    fn business_days_in_month(&self, year: u16, month: u8) -> Result<BusinessDays> {
        let first = Date::from_ymd(year, month, 1)?;
        Ok(self.count_business_days(first, first.end_of_month()))
    }

    /// Holidays in `[from, to]`, optionally including weekend days.
    fn holiday_list(&self, from: Date, to: Date, include_weekends: bool) -> Vec<Date> {
        from.range_inclusive(to)
            .filter(|&d| {
                if include_weekends {
                    !self.is_business_day(d)
                } else {
                    self.is_holiday(d) && !self.is_weekend(d)
                }
            })
            .collect()
    }
}

/// A calendar that treats only Saturdays and Sundays as non-business days,
/// with no additional holidays.
///
/// Reproduces the weekday-only counting of older job records.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_holiday(&self, _date: Date) -> bool {
        false
    }
}
