pub mod config;
pub mod error;
pub mod structure;

/// Tolerance for coordinate comparisons at gap and fraction boundaries.
pub const EPSILON: f64 = 1e-6;
