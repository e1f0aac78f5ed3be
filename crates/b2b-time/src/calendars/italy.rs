//! Italy calendar, as observed by the workshop.

use b2b_core::BusinessDays;

use crate::calendar::Calendar;
use crate::date::Date;
use crate::holidays::HolidaySet;

/// Which year's holiday set applies to each day of a counted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HolidayYearMode {
    /// Every day is checked against its own year's holidays.
    #[default]
    PerDate,
    /// The holiday set of the range's start year is applied to the whole
    /// range, so holidays in later years are not excluded.  Matches working
    /// day counts stored by earlier versions of the workshop tool.
    StartYear,
}

/// Italy calendar.
///
/// Weekends and the following holidays are observed:
/// * New Year's Day (Jan 1)
/// * Epiphany (Jan 6)
/// * Easter Monday
/// * Liberation Day (Apr 25)
/// * Labour Day (May 1)
/// * Republic Day (Jun 2)
/// * Saints Peter and Paul (Jun 29)
/// * Assumption of Mary (Aug 15)
/// * All Saints' Day (Nov 1)
/// * Immaculate Conception (Dec 8)
/// * Christmas Day (Dec 25)
/// * St. Stephen's Day (Dec 26)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Italy {
    holiday_years: HolidayYearMode,
}

impl Italy {
    /// Italy calendar checking each day against its own year.
    pub fn new() -> Self {
        Self::default()
    }

    /// Italy calendar with an explicit [`HolidayYearMode`].
    pub fn with_holiday_year_mode(holiday_years: HolidayYearMode) -> Self {
        Self { holiday_years }
    }

    /// The configured [`HolidayYearMode`].
    pub fn holiday_year_mode(&self) -> HolidayYearMode {
        self.holiday_years
    }
}

impl Calendar for Italy {
    fn name(&self) -> &str {
        "Italy"
    }

    fn is_holiday(&self, date: Date) -> bool {
        HolidaySet::for_date(date).contains(date)
    }

    fn count_business_days(&self, start: Date, end: Date) -> BusinessDays {
        match self.holiday_years {
            HolidayYearMode::PerDate => start
                .range_inclusive(end)
                .filter(|&d| self.is_business_day(d))
                .count() as BusinessDays,
            HolidayYearMode::StartYear => {
                let holidays = HolidaySet::for_date(start);
                start
                    .range_inclusive(end)
                    .filter(|&d| !d.is_weekend() && !holidays.contains(d))
                    .count() as BusinessDays
            }
        }
    }
}
