//! Errors and status codes for LU factorization.

use thiserror::Error;

/// Failure of an LU factorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LuError {
    /// The buffers do not match the stated dimensions.
    #[error("matrix dimensions do not match the supplied buffers")]
    DimensionMismatch,

    /// `U[index][index]` is exactly zero. The factorization itself completed.
    #[error("matrix is singular: zero pivot in column {index}")]
    Singular {
        /// Zero-based column of the first zero pivot.
        index: usize,
    },
}

impl LuError {
    /// LAPACK-style `info` code: `-1` for bad dimensions, `index + 1` for a
    /// zero pivot.
    #[must_use]
    pub fn status(&self) -> i64 {
        match *self {
            LuError::DimensionMismatch => -1,
            LuError::Singular { index } => i64::try_from(index).map_or(i64::MAX, |i| i + 1),
        }
    }
}

/// Status code of a factorization result; `0` on success.
#[must_use]
pub fn status(result: &Result<(), LuError>) -> i64 {
    result.as_ref().map_or_else(LuError::status, |_| 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(status(&Ok(())), 0);
        assert_eq!(status(&Err(LuError::DimensionMismatch)), -1);
        assert_eq!(status(&Err(LuError::Singular { index: 0 })), 1);
        assert_eq!(LuError::Singular { index: 4 }.status(), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            LuError::Singular { index: 2 }.to_string(),
            "matrix is singular: zero pivot in column 2"
        );
    }
}
