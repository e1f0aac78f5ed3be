//! String-level helpers shared by the date types.

/// Date-string parsers for the `DD/MM/YYYY` and ISO formats.
pub mod data_parsers;
