//! Error types shared by the numeric crates.

use thiserror::Error;

/// Coarse classification of a [`NumError`].
///
/// Callers that only need to branch on the cause of a failure can match on
/// this instead of on every individual variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The operation was given a structurally invalid argument.
    InvalidArgument,
    /// A quotient was requested whose divisor is zero.
    DivisionByZero,
}

/// Errors reported by integer, rational and float operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NumError {
    /// The divisor of a quotient has value zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A rational was built with a zero denominator.
    #[error("denominator cannot be zero")]
    ZeroDenominator,

    /// A modular operation was given a zero modulus.
    #[error("modulus cannot be zero")]
    ZeroModulus,

    /// The requested base is outside `2..=62`.
    #[error("unsupported base {0}: expected a base between 2 and 62")]
    UnsupportedBase(u32),

    /// Text could not be parsed in the requested base.
    #[error("malformed number {input:?} for base {base}")]
    Malformed {
        /// The rejected input.
        input: String,
        /// The base it was parsed in.
        base: u32,
    },

    /// Square root of a negative value.
    #[error("square root of a negative value")]
    NegativeSquareRoot,

    /// No modular inverse exists for the operand.
    #[error("operand is not invertible modulo the given modulus")]
    NotInvertible,

    /// A multifactorial step of zero.
    #[error("multifactorial step must be at least 1")]
    InvalidStep,

    /// A float precision of zero bits.
    #[error("precision must be at least 1 bit")]
    ZeroPrecision,

    /// NaN or an infinity where a finite value is required.
    #[error("value is not finite")]
    NonFinite,

    /// A float result whose binary exponent is out of range.
    #[error("binary exponent out of range")]
    ExponentOverflow,
}

impl NumError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            NumError::DivisionByZero => ErrorKind::DivisionByZero,
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Builds a [`NumError::Malformed`] for `input` in `base`.
    #[must_use]
    pub fn malformed(input: &str, base: u32) -> Self {
        NumError::Malformed {
            input: input.to_owned(),
            base,
        }
    }
}

/// Result alias for numeric operations.
pub type NumResult<T> = Result<T, NumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(NumError::DivisionByZero.kind(), ErrorKind::DivisionByZero);
        assert_eq!(NumError::ZeroDenominator.kind(), ErrorKind::InvalidArgument);
        assert_eq!(NumError::UnsupportedBase(63).kind(), ErrorKind::InvalidArgument);
        assert_eq!(NumError::NegativeSquareRoot.kind(), ErrorKind::InvalidArgument);
        assert_eq!(NumError::ExponentOverflow.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_display() {
        assert_eq!(NumError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumError::malformed("12z", 10).to_string(),
            "malformed number \"12z\" for base 10"
        );
    }
}
