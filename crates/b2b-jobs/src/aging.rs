//! Aging of open jobs.
//!
//! A job ages by the business days elapsed since its assignment date, both
//! ends included.  Past the `warning` threshold it falls into one of three
//! buckets, shown on the board as yellow, orange and red.

use b2b_core::errors::{Error, Result};
use b2b_core::BusinessDays;
use b2b_time::{Calendar, Date};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::JobRecord;

/// Aging bucket of an open job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgingBucket {
    /// Bucket A: past `warning`, up to `late`.
    Warning,
    /// Bucket B: past `late`, up to `overdue`.
    Late,
    /// Bucket C: past `overdue`.
    Overdue,
}

impl AgingBucket {
    /// Single-letter code used in the notification list.
    pub fn code(&self) -> char {
        match self {
            AgingBucket::Warning => 'A',
            AgingBucket::Late => 'B',
            AgingBucket::Overdue => 'C',
        }
    }

    /// Board colour.
    pub fn color(&self) -> &'static str {
        match self {
            AgingBucket::Warning => "yellow",
            AgingBucket::Late => "orange",
            AgingBucket::Overdue => "red",
        }
    }

    /// Legend label for the default thresholds.
    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Warning => "10-15 giorni",
            AgingBucket::Late => "16-20 giorni",
            AgingBucket::Overdue => "Oltre 20 giorni",
        }
    }
}

impl std::fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Upper bounds (inclusive) of the unflagged range and of buckets A and B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgingThresholds {
    /// Jobs at or below this many days are not flagged.
    pub warning: BusinessDays,
    /// Last day of bucket A.
    pub late: BusinessDays,
    /// Last day of bucket B.
    pub overdue: BusinessDays,
}

impl Default for AgingThresholds {
    fn default() -> Self {
        Self {
            warning: 10,
            late: 15,
            overdue: 20,
        }
    }
}

impl AgingThresholds {
    /// Thresholds must be strictly increasing.
    pub fn validate(&self) -> Result<()> {
        if self.warning < self.late && self.late < self.overdue {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "aging thresholds must be strictly increasing, got {}/{}/{}",
                self.warning, self.late, self.overdue
            )))
        }
    }

    /// Bucket for a job open for `days` business days.
    pub fn classify(&self, days: BusinessDays) -> Option<AgingBucket> {
        if days > self.overdue {
            Some(AgingBucket::Overdue)
        } else if days > self.late {
            Some(AgingBucket::Late)
        } else if days > self.warning {
            Some(AgingBucket::Warning)
        } else {
            None
        }
    }
}

/// An open job past the warning threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notification<'a> {
    /// The job.
    pub job: &'a JobRecord,
    /// Business days since assignment.
    pub working_days: BusinessDays,
    /// Aging bucket.
    pub bucket: AgingBucket,
}

/// Open jobs that need attention, oldest first.
///
/// Delivered jobs are skipped.  A non-empty `search` keeps only jobs whose
/// fleet, plate or contractor contains it, ignoring case.  Ties are broken
/// by plate.
pub fn overdue_jobs<'a, I>(
    jobs: I,
    calendar: &dyn Calendar,
    today: Date,
    thresholds: &AgingThresholds,
    search: &str,
) -> Vec<Notification<'a>>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut out: Vec<Notification<'a>> = jobs
        .into_iter()
        .filter(|job| !job.stato.is_delivered())
        .filter(|job| job.matches(search))
        .filter_map(|job| {
            let working_days = job.elapsed_business_days(calendar, today);
            thresholds.classify(working_days).map(|bucket| Notification {
                job,
                working_days,
                bucket,
            })
        })
        .collect();
    out.sort_by(|a, b| {
        b.working_days
            .cmp(&a.working_days)
            .then_with(|| a.job.targa.cmp(&b.job.targa))
    });
    debug!(count = out.len(), %today, "overdue jobs");
    out
}

/// Legend counts of a notification list, one entry per bucket.
pub fn bucket_counts(notifications: &[Notification<'_>]) -> [(AgingBucket, usize); 3] {
    [AgingBucket::Warning, AgingBucket::Late, AgingBucket::Overdue].map(|bucket| {
        let count = notifications.iter().filter(|n| n.bucket == bucket).count();
        (bucket, count)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries() {
        let t = AgingThresholds::default();
        assert_eq!(t.classify(0), None);
        assert_eq!(t.classify(10), None);
        assert_eq!(t.classify(11), Some(AgingBucket::Warning));
        assert_eq!(t.classify(15), Some(AgingBucket::Warning));
        assert_eq!(t.classify(16), Some(AgingBucket::Late));
        assert_eq!(t.classify(20), Some(AgingBucket::Late));
        assert_eq!(t.classify(21), Some(AgingBucket::Overdue));
    }

    #[test]
    fn custom_thresholds() {
        let t = AgingThresholds {
            warning: 3,
            late: 5,
            overdue: 8,
        };
        assert!(t.validate().is_ok());
        assert_eq!(t.classify(4), Some(AgingBucket::Warning));
        assert_eq!(t.classify(9), Some(AgingBucket::Overdue));
    }

    #[test]
    fn thresholds_must_increase() {
        let t = AgingThresholds {
            warning: 10,
            late: 10,
            overdue: 20,
        };
        assert!(matches!(t.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn empty_list_has_zero_legend_counts() {
        assert_eq!(
            bucket_counts(&[]),
            [
                (AgingBucket::Warning, 0),
                (AgingBucket::Late, 0),
                (AgingBucket::Overdue, 0),
            ]
        );
    }

    #[test]
    fn bucket_presentation() {
        assert_eq!(AgingBucket::Warning.code(), 'A');
        assert_eq!(AgingBucket::Late.color(), "orange");
        assert_eq!(AgingBucket::Overdue.label(), "Oltre 20 giorni");
        assert_eq!(AgingBucket::Overdue.to_string(), "C");
    }
}
