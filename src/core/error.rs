use thiserror::Error;

/// Failures raised by the vacuum analysis and repositioning engine.
///
/// None of these are recovered from internally; an ambiguous structure is
/// reported back to the caller instead of being guessed at.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VacuumError {
    #[error("need at least {required} atom(s) to define a span, found {found}")]
    InsufficientAtoms { required: usize, found: usize },

    #[error("vacuum thickness must be greater than zero, got {0} Å")]
    InvalidVacuum(f64),

    #[error("vacuum layer threshold must be greater than zero, got {0} Å")]
    InvalidThreshold(f64),

    #[error("no vacuum layer wider than {threshold} Å found along the {axis}-axis")]
    NoVacuumLayer { axis: String, threshold: f64 },

    #[error("{count} vacuum layers wider than {threshold} Å found along the {axis}-axis, expected exactly one")]
    MultipleVacuumLayers {
        axis: String,
        count: usize,
        threshold: f64,
    },

    #[error("atoms span {span:.6} Å along the {axis}-axis but the cell is only {cell_length:.6} Å long")]
    SpanExceedsCell {
        axis: String,
        span: f64,
        cell_length: f64,
    },

    #[error("invalid axis '{0}', must be 'x', 'y' or 'z'")]
    InvalidAxis(String),

    #[error("unsupported placement mode '{0}', must be 'top', 'bottom' or 'center'")]
    InvalidMode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("lattice has zero or near-zero volume")]
    DegenerateLattice,
}

pub type Result<T> = std::result::Result<T, VacuumError>;
