//! Data parsing helpers.
//!
//! Split date strings into `(year, month, day)` triples.  These functions
//! only check the *shape* of the input; calendar validity (e.g. February 30)
//! is checked by `b2b_time::Date::from_ymd`.

/// Parse a date string in `DD/MM/YYYY` format.
///
/// One- or two-digit day and month fields are accepted (`1/2/2024`), the
/// year must have exactly four digits.  Surrounding whitespace is ignored.
///
/// Returns `(year, month, day)` on success.
pub fn parse_date_slash(s: &str) -> Option<(u16, u8, u8)> {
    let mut parts = s.trim().split('/');
    let day = parse_field(parts.next()?, 1, 2)?;
    let month = parse_field(parts.next()?, 1, 2)?;
    let year = parse_field(parts.next()?, 4, 4)?;
    if parts.next().is_some() {
        return None;
    }
    Some((year, u8::try_from(month).ok()?, u8::try_from(day).ok()?))
}

/// Parse a date string in ISO 8601 format (`YYYY-MM-DD`).
///
/// A trailing time component separated by a space or `T`
/// (`2024-03-05 00:00:00`) is ignored, as spreadsheet exports often append
/// one.
///
/// Returns `(year, month, day)` on success.
pub fn parse_iso_date(s: &str) -> Option<(u16, u8, u8)> {
    let s = s.trim();
    let date_part = s.split([' ', 'T']).next()?;
    let mut parts = date_part.split('-');
    let year = parse_field(parts.next()?, 4, 4)?;
    let month = parse_field(parts.next()?, 1, 2)?;
    let day = parse_field(parts.next()?, 1, 2)?;
    if parts.next().is_some() {
        return None;
    }
    Some((year, u8::try_from(month).ok()?, u8::try_from(day).ok()?))
}

fn parse_field(field: &str, min_len: usize, max_len: usize) -> Option<u16> {
    if field.len() < min_len
        || field.len() > max_len
        || !field.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    field.parse().ok()
}
