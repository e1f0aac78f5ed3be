//! # b2b
//!
//! Working-day calendar and repair-job metrics for a fleet repair workshop.
//!
//! This crate is a façade that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `b2b-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! b2b = "0.1"
//! ```
//!
//! ```rust
//! use b2b::jobs::{JobIntake, WorkshopConfig};
//! use b2b::time::{Calendar, Date};
//!
//! let config = WorkshopConfig::default();
//! let calendar = config.calendar();
//!
//! let job = JobIntake {
//!     flotta: "leasys".into(),
//!     targa: "ab123cd".into(),
//!     modello: "panda".into(),
//!     entrata: "20/12/2024".into(),
//!     data_incarico: "23/12/2024".into(),
//! }
//! .build_record(calendar.as_ref(), &config)
//! .unwrap();
//!
//! // Christmas, St. Stephen's, New Year's Day and Epiphany are skipped.
//! assert_eq!(job.prev_uscita, Date::from_ymd(2025, 1, 10).unwrap());
//! assert_eq!(job.metrics.gg_entrata_data_incarico, 2);
//! assert!(!calendar.is_business_day(Date::from_ymd(2025, 1, 6).unwrap()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions and process-wide settings.
pub use b2b_core as core;

/// Dates, holidays and working-day calendars.
pub use b2b_time as time;

/// Job records, aging, status board and reports.
pub use b2b_jobs as jobs;
