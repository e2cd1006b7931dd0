//! Errors for bounded sampling.

use thiserror::Error;

/// A bound that no draw can satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SampleError {
    /// The upper bound is below zero.
    #[error("upper bound must not be negative")]
    NegativeBound,

    /// A float bound is NaN or infinite.
    #[error("upper bound must be finite")]
    NonFiniteBound,

    /// An exclusive bound of zero leaves nothing to draw.
    #[error("exclusive upper bound of zero is an empty range")]
    EmptyRange,
}
