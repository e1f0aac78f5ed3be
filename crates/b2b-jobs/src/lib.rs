//! # b2b-jobs
//!
//! Repair jobs ("targhe") tracked by the workshop, and everything derived
//! from them with the working-day calendar:
//!
//! * [`JobIntake`] / [`JobUpdate`]: validated user input, turned into a
//!   [`JobRecord`] with its working-day metrics and promised delivery date;
//! * [`JobRegister`]: in-memory set of jobs keyed by plate, entry date and
//!   assignment date;
//! * [`aging`]: aging buckets and the overdue-jobs notification list;
//! * [`board`]: open jobs grouped by workflow state;
//! * [`stats`]: per-state counts and monthly fleet/contractor reports;
//! * [`WorkshopConfig`]: lead time, aging thresholds and calendar choice.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Aging buckets and overdue notifications.
pub mod aging;

/// Status board: jobs grouped by state.
pub mod board;

/// Workshop configuration.
pub mod config;

/// Job records, intake, and update.
pub mod record;

/// In-memory job register.
pub mod register;

/// Workflow states.
pub mod state;

/// Aggregate statistics.
pub mod stats;

pub use aging::{bucket_counts, overdue_jobs, AgingBucket, AgingThresholds, Notification};
pub use board::{BoardCell, CellMarker, StatusBoard};
pub use config::{CalendarKind, WorkshopConfig};
pub use record::{JobIntake, JobKey, JobMetrics, JobRecord, JobUpdate};
pub use register::JobRegister;
pub use state::JobState;
pub use stats::{
    contractor_recap, monthly_fleet_stats, state_counts, state_report, ContractorRecap,
    FleetMonthStats, StateCount, StateSummary,
};
