//! Workshop configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```
//! use b2b_jobs::WorkshopConfig;
//!
//! let cfg = WorkshopConfig::from_json(r#"{ "delivery_lead_days": 8 }"#).unwrap();
//! assert_eq!(cfg.delivery_lead_days, 8);
//! assert_eq!(cfg.aging.warning, 10);
//! ```

use std::path::Path;

use b2b_core::errors::{Error, Result};
use b2b_core::BusinessDays;
use b2b_time::{Calendar, HolidayYearMode, Italy, WeekendsOnly};
use serde::{Deserialize, Serialize};

use crate::aging::AgingThresholds;

/// Which working-day calendar job metrics are computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    /// Weekends and Italian public holidays are closed.
    #[default]
    Italy,
    /// Only weekends are closed.
    WeekendsOnly,
}

/// Workshop-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkshopConfig {
    /// Business days between assignment and the promised delivery date.
    pub delivery_lead_days: BusinessDays,
    /// Aging bucket boundaries.
    pub aging: AgingThresholds,
    /// Working-day calendar.
    pub calendar: CalendarKind,
    /// Holiday-year handling for ranges crossing a year boundary (Italy only).
    pub holiday_year_mode: HolidayYearMode,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            delivery_lead_days: 10,
            aging: AgingThresholds::default(),
            calendar: CalendarKind::default(),
            holiday_year_mode: HolidayYearMode::default(),
        }
    }
}

impl WorkshopConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        self.aging.validate()
    }

    /// Build the configured calendar.
    pub fn calendar(&self) -> Box<dyn Calendar> {
        match self.calendar {
            CalendarKind::Italy => Box::new(Italy::with_holiday_year_mode(self.holiday_year_mode)),
            CalendarKind::WeekendsOnly => Box::new(WeekendsOnly),
        }
    }
}
