//! Concrete calendar implementations.

/// Italian calendar used by the workshop.
pub mod italy;
