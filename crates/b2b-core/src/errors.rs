//! Error types for b2b-rs.
//!
//! Every crate in the workspace reports failures through the single
//! `thiserror`-derived [`Error`] enum defined here.

use thiserror::Error;

/// The top-level error type used throughout b2b-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Date construction or date arithmetic left the supported range.
    #[error("date error: {0}")]
    Date(String),

    /// A date (or other value) string could not be parsed.
    #[error("cannot parse {input:?}: expected {expected}")]
    Parse {
        /// The offending input.
        input: String,
        /// Human-readable description of the accepted format.
        expected: &'static str,
    },

    /// A required field was left empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A job with the same plate, entry date and assignment date exists.
    #[error("job {targa} (entrata {entrata}, incarico {data_incarico}) already registered")]
    DuplicateJob {
        /// Licence plate.
        targa: String,
        /// Workshop entry date (`DD/MM/YYYY`).
        entrata: String,
        /// Assignment date (`DD/MM/YYYY`).
        data_incarico: String,
    },

    /// A job with the same plate and entry date exists.
    #[error("plate {targa} already registered with entry date {entrata}")]
    DuplicateEntry {
        /// Licence plate.
        targa: String,
        /// Workshop entry date (`DD/MM/YYYY`).
        entrata: String,
    },

    /// Lookup found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand `Result` type used throughout b2b-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;
