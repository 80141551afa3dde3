//! Shared error type for the numeric kernels

use thiserror::Error;

/// Errors raised by encoders and models
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// No rows to fit on
    #[error("cannot fit on an empty sample")]
    EmptyInput,

    /// Matrix/vector shapes do not line up
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// NaN or infinity in the input
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}

pub type StatsResult<T> = Result<T, StatsError>;
