//! # b2b-core
//!
//! Core types and error definitions for b2b-rs.
//!
//! This crate holds the [`Error`] enum shared by the other crates in the
//! workspace and the process-wide [`Settings`] (evaluation date).  The
//! low-level string parsers used at the `DD/MM/YYYY` boundary live here too.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types.
pub mod errors;

/// Global settings (evaluation date).
pub mod settings;

/// Miscellaneous utilities.
pub mod utilities;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Count of business (working) days.
pub type BusinessDays = u32;

/// Alias used for array sizes / indices.
pub type Size = usize;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::{ScopedEvaluationDate, Settings};
