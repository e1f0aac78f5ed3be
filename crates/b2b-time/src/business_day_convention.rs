//! Business-day convention.

/// How to adjust a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BusinessDayConvention {
    /// Choose the first business day after the given holiday.
    Following,
    /// Choose the first business day before the given holiday.  This is how
    /// user-entered dates are normalised before they are stored.
    #[default]
    Preceding,
    /// Do not adjust (keep the original date).
    Unadjusted,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        };
        write!(f, "{s}")
    }
}
