//! Italian public holidays observed by the workshop.
//!
//! [`holidays_for_year`] is the single source of the holiday table: eleven
//! fixed-date holidays plus Easter Monday, whose date moves every year and is
//! derived from Easter Sunday by the Meeus/Jones/Butcher computus.
//!
//! Holiday sets are cheap value types recomputed on demand; nothing is cached
//! or persisted.

use b2b_core::errors::{Error, Result};

use crate::date::Date;

/// A named public holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Holiday {
    /// Capodanno, January 1.
    NewYearsDay,
    /// Epifania, January 6.
    Epiphany,
    /// Lunedì dell'Angelo, the day after Easter Sunday.
    EasterMonday,
    /// Festa della Liberazione, April 25.
    LiberationDay,
    /// Festa dei Lavoratori, May 1.
    LabourDay,
    /// Festa della Repubblica, June 2.
    RepublicDay,
    /// Santi Pietro e Paolo, June 29.
    SaintsPeterAndPaul,
    /// Ferragosto, August 15.
    Assumption,
    /// Ognissanti, November 1.
    AllSaints,
    /// Immacolata Concezione, December 8.
    ImmaculateConception,
    /// Natale, December 25.
    Christmas,
    /// Santo Stefano, December 26.
    SaintStephen,
}

impl Holiday {
    /// The fixed-date holidays with their `(month, day)`.
    pub const FIXED: [(Holiday, u8, u8); 11] = [
        (Holiday::NewYearsDay, 1, 1),
        (Holiday::Epiphany, 1, 6),
        (Holiday::LiberationDay, 4, 25),
        (Holiday::LabourDay, 5, 1),
        (Holiday::RepublicDay, 6, 2),
        (Holiday::SaintsPeterAndPaul, 6, 29),
        (Holiday::Assumption, 8, 15),
        (Holiday::AllSaints, 11, 1),
        (Holiday::ImmaculateConception, 12, 8),
        (Holiday::Christmas, 12, 25),
        (Holiday::SaintStephen, 12, 26),
    ];

    /// Italian name of the holiday.
    pub fn italian_name(&self) -> &'static str {
        match self {
            Holiday::NewYearsDay => "Capodanno",
            Holiday::Epiphany => "Epifania",
            Holiday::EasterMonday => "Lunedì dell'Angelo",
            Holiday::LiberationDay => "Festa della Liberazione",
            Holiday::LabourDay => "Festa dei Lavoratori",
            Holiday::RepublicDay => "Festa della Repubblica",
            Holiday::SaintsPeterAndPaul => "Santi Pietro e Paolo",
            Holiday::Assumption => "Ferragosto",
            Holiday::AllSaints => "Ognissanti",
            Holiday::ImmaculateConception => "Immacolata Concezione",
            Holiday::Christmas => "Natale",
            Holiday::SaintStephen => "Santo Stefano",
        }
    }
}

impl std::fmt::Display for Holiday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.italian_name())
    }
}

/// The non-working days of a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolidaySet {
    year: u16,
    easter_monday: (u8, u8),
}

impl HolidaySet {
    /// Holiday set of the year `date` falls in.
    pub(crate) fn for_date(date: Date) -> Self {
        let year = date.year();
        Self {
            year,
            easter_monday: easter_monday_md(year),
        }
    }

    /// The year this set belongs to.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Return `true` if `date` is one of this year's holidays.  Dates of other
    /// years are never contained.
    pub fn contains(&self, date: Date) -> bool {
        let (y, m, d) = date.ymd();
        y == self.year && self.holiday_on(m, d).is_some()
    }

    /// The holiday falling on `month`/`day` of this year, if any.
    ///
    /// When Easter Monday coincides with Liberation Day the fixed holiday is
    /// reported.
    pub fn holiday_on(&self, month: u8, day: u8) -> Option<Holiday> {
        Holiday::FIXED
            .iter()
            .find(|&&(_, m, d)| m == month && d == day)
            .map(|&(h, _, _)| h)
            .or_else(|| (self.easter_monday == (month, day)).then_some(Holiday::EasterMonday))
    }

    /// Easter Monday of this year.
    pub fn easter_monday(&self) -> Date {
        self.date_of(self.easter_monday)
    }

    /// All holidays with their dates, sorted by date.
    ///
    /// Always twelve entries; two of them share a date in years where Easter
    /// Monday falls on April 25.
    pub fn entries(&self) -> Vec<(Date, Holiday)> {
        let mut entries: Vec<(Date, Holiday)> = Holiday::FIXED
            .iter()
            .map(|&(h, m, d)| (self.date_of((m, d)), h))
            .collect();
        entries.push((self.easter_monday(), Holiday::EasterMonday));
        entries.sort();
        entries
    }

    /// The distinct holiday dates, sorted.
    pub fn dates(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self.entries().into_iter().map(|(d, _)| d).collect();
        dates.dedup();
        dates
    }

    /// Number of distinct holiday dates (11 or 12).
    pub fn len(&self) -> usize {
        self.dates().len()
    }

    /// Always `false`: every year has holidays.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn date_of(&self, (month, day): (u8, u8)) -> Date {
        // `year` was validated on construction and every (month, day) in the
        // table exists in every year.
        Date::from_ymd(self.year, month, day).unwrap_or(Date::MIN)
    }
}

/// Return the holiday set for `year`.
///
/// # Note
/// The set holds eleven fixed-date holidays plus Easter Monday, which is
/// twelve distinct dates in most years.  When Easter Monday falls on
/// 25 April (2011, 2095, 2163) it coincides with Liberation Day and the set has
/// eleven distinct dates.
///
/// # Errors
/// Returns [`Error::Date`] if `year` is outside the supported range
/// 1900–2199.
pub fn holidays_for_year(year: u16) -> Result<HolidaySet> {
    if !(1900..=2199).contains(&year) {
        return Err(Error::Date(format!(
            "year {year} out of range [1900, 2199]"
        )));
    }
    Ok(HolidaySet {
        year,
        easter_monday: easter_monday_md(year),
    })
}

/// Easter Sunday of `year` (Gregorian calendar).
pub fn easter_sunday(year: u16) -> Result<Date> {
    let (m, d) = easter_sunday_md(year);
    Date::from_ymd(year, m, d)
}

/// Easter Monday of `year`: Easter Sunday plus one day.
pub fn easter_monday(year: u16) -> Result<Date> {
    let (m, d) = easter_monday_md(year);
    Date::from_ymd(year, m, d)
}

/// `(month, day)` of Easter Sunday, by the Meeus/Jones/Butcher form of
/// Gauss's computus.
fn easter_sunday_md(year: u16) -> (u8, u8) {
    let y = year as i32;
    let a = y % 19;
    let b = y / 100;
    let c = y % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;
    ((n / 31) as u8, (n % 31 + 1) as u8)
}

fn easter_monday_md(year: u16) -> (u8, u8) {
    match easter_sunday_md(year) {
        (3, 31) => (4, 1),
        (m, d) => (m, d + 1),
    }
}
