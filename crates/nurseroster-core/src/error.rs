//! Error types for nurseroster-core.

use thiserror::Error;

/// Errors raised while constructing or validating core types.
///
/// Parse errors for the instance file format live in `nurseroster-io`; this
/// enum only covers configuration-time failures of the core data model
/// (size descriptors, axis bounds, time-zone resolution).
#[derive(Debug, Error)]
pub enum CoreError {
    /// One of the four axis dimensions was zero at construction.
    #[error("invalid size descriptor: dimension {0} is zero")]
    ZeroDimension(&'static str),

    /// An axis reference did not match the size declared for that dimension.
    #[error("axis length mismatch: {axis} has {actual} entries, expected {expected}")]
    AxisLengthMismatch {
        axis: &'static str,
        actual: usize,
        expected: usize,
    },

    /// A skill reference in a shift or employee pointed past the skill axis.
    #[error("unknown skill index {0}")]
    UnknownSkill(usize),

    /// A requested IANA time zone name could not be resolved.
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
}

/// Result type alias for nurseroster-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
