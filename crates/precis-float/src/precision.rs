//! Process-wide default precision and explicit precision contexts.
//!
//! Constructors that take no precision read the default through
//! [`default_precision`]. Code that wants to be independent of the global
//! setting threads a [`FloatContext`] instead.

use parking_lot::{const_rwlock, RwLock};
use precis_integers::{Integer, NumError, NumResult, Rational};

use crate::BigFloat;

/// Precision in bits used until [`set_default_precision`] is called.
pub const DEFAULT_PRECISION: usize = 64;

static DEFAULT: RwLock<usize> = const_rwlock(DEFAULT_PRECISION);

/// Returns the current default precision in bits.
#[must_use]
pub fn default_precision() -> usize {
    *DEFAULT.read()
}

/// Sets the default precision for subsequent constructions.
///
/// Existing values keep their own precision.
///
/// # Errors
///
/// Returns [`NumError::ZeroPrecision`] if `precision` is zero.
pub fn set_default_precision(precision: usize) -> NumResult<()> {
    check_precision(precision)?;
    let previous = std::mem::replace(&mut *DEFAULT.write(), precision);
    tracing::debug!(previous, precision, "default float precision changed");
    Ok(())
}

pub(crate) fn check_precision(precision: usize) -> NumResult<()> {
    if precision == 0 {
        Err(NumError::ZeroPrecision)
    } else {
        Ok(())
    }
}

/// An explicit precision threaded through float construction.
///
/// # Example
///
/// ```
/// use precis_float::FloatContext;
///
/// let ctx = FloatContext::new(200).unwrap();
/// let third = ctx.from_i64(1) / ctx.from_i64(3);
/// assert_eq!(third.precision(), 200);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FloatContext {
    precision: usize,
}

impl FloatContext {
    /// Creates a context for the given precision in bits.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroPrecision`] if `precision` is zero.
    pub fn new(precision: usize) -> NumResult<Self> {
        check_precision(precision)?;
        Ok(Self { precision })
    }

    /// Snapshots the current default precision.
    #[must_use]
    pub fn ambient() -> Self {
        Self {
            precision: default_precision(),
        }
    }

    /// The precision of values built by this context.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Zero at this precision.
    #[must_use]
    pub fn zero(&self) -> BigFloat {
        BigFloat::zero_with(self.precision)
    }

    /// Rounds an integer to this precision.
    #[must_use]
    pub fn from_integer(&self, value: &Integer) -> BigFloat {
        BigFloat::round_integer(value, self.precision)
    }

    /// Rounds a rational to this precision.
    #[must_use]
    pub fn from_rational(&self, value: &Rational) -> BigFloat {
        BigFloat::round_rational(value, self.precision)
    }

    /// Rounds an `i64` to this precision.
    #[must_use]
    pub fn from_i64(&self, value: i64) -> BigFloat {
        BigFloat::round_integer(&Integer::new(value), self.precision)
    }

    /// Rounds a `u64` to this precision.
    #[must_use]
    pub fn from_u64(&self, value: u64) -> BigFloat {
        BigFloat::round_integer(&Integer::from(value), self.precision)
    }

    /// Rounds an `f64` to this precision.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NonFinite`] for NaN and infinities.
    pub fn from_f64(&self, value: f64) -> NumResult<BigFloat> {
        BigFloat::round_f64(value, self.precision)
    }

    /// Parses text in `base` at this precision.
    ///
    /// # Errors
    ///
    /// See [`BigFloat::from_str_radix`].
    pub fn parse(&self, text: &str, base: u32) -> NumResult<BigFloat> {
        BigFloat::from_str_radix(text, base, self.precision)
    }
}

impl Default for FloatContext {
    fn default() -> Self {
        Self::ambient()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::{Mutex, MutexGuard};

    static SERIAL: Mutex<()> = parking_lot::const_mutex(());

    /// Serializes tests that read the global default.
    pub(crate) fn lock_default() -> MutexGuard<'static, ()> {
        SERIAL.lock()
    }

    /// Holds the default at a test value and puts the old one back on drop,
    /// even when the test panics.
    pub(crate) struct ScopedDefault {
        previous: usize,
        _serial: MutexGuard<'static, ()>,
    }

    impl Drop for ScopedDefault {
        fn drop(&mut self) {
            *DEFAULT.write() = self.previous;
        }
    }

    pub(crate) fn scoped_default(precision: usize) -> ScopedDefault {
        let serial = lock_default();
        let previous = default_precision();
        set_default_precision(precision).unwrap();
        ScopedDefault {
            previous,
            _serial: serial,
        }
    }

    #[test]
    fn test_default_round_trip() {
        let before = {
            let _guard = lock_default();
            default_precision()
        };
        {
            let _scope = scoped_default(128);
            assert_eq!(default_precision(), 128);
            assert_eq!(FloatContext::ambient().precision(), 128);
            assert_eq!(BigFloat::from_i64(3).precision(), 128);
        }
        let _guard = lock_default();
        assert_eq!(default_precision(), before);
    }

    #[test]
    fn test_scoped_default_restores_after_panic() {
        let before = {
            let _guard = lock_default();
            default_precision()
        };
        let outcome = std::panic::catch_unwind(|| {
            let _scope = scoped_default(before + 7);
            panic!("assertion failed while the default was raised");
        });
        assert!(outcome.is_err());
        let _guard = lock_default();
        assert_eq!(default_precision(), before);
    }

    #[test]
    fn test_zero_precision_rejected() {
        let _guard = lock_default();
        let before = default_precision();
        assert_eq!(set_default_precision(0), Err(NumError::ZeroPrecision));
        assert_eq!(default_precision(), before);
        assert_eq!(FloatContext::new(0), Err(NumError::ZeroPrecision));
    }

    #[test]
    fn test_existing_values_keep_precision() {
        let _scope = scoped_default(64);
        let x = BigFloat::from_u64(5);
        set_default_precision(104).unwrap();
        assert_eq!(x.precision(), 64);
    }

    #[test]
    fn test_context_constructors() {
        let ctx = FloatContext::new(10).unwrap();
        // 1023 needs 10 bits, 1025 rounds to 1024.
        assert_eq!(ctx.from_u64(1023), 1023u64);
        assert_eq!(ctx.from_u64(1025), 1024u64);
        assert_eq!(ctx.from_i64(-6).precision(), 10);
        assert_eq!(ctx.from_f64(0.5).unwrap(), 0.5);
        assert!(ctx.zero().is_zero());
        let third = Rational::from_i64(1, 3).unwrap();
        assert!(ctx.from_rational(&third) < 0.334);
    }
}
