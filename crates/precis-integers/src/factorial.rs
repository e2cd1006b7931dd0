//! Factorials and their stepped variants.

use dashu::integer::UBig;

use crate::error::{NumError, NumResult};
use crate::Integer;

/// Product of `count` terms `start, start - step, start - 2*step, ...`.
///
/// Splits the range in halves so the multiplications stay balanced.
fn descending_product(start: u64, step: u64, count: u64) -> UBig {
    if count <= 8 {
        return (0..count).fold(UBig::ONE, |acc, i| acc * UBig::from(start - i * step));
    }
    let half = count / 2;
    descending_product(start, step, half) * descending_product(start - half * step, step, count - half)
}

/// `n * (n - step) * ...` down to the last positive term; 1 for `n == 0`.
fn stepped_factorial(n: u64, step: u64) -> Integer {
    if n == 0 {
        return Integer::new(1);
    }
    let count = (n - 1) / step + 1;
    Integer::from(descending_product(n, step, count))
}

impl Integer {
    /// Computes `n!`.
    #[must_use]
    pub fn factorial(n: u64) -> Self {
        stepped_factorial(n, 1)
    }

    /// Computes `n!! = n * (n - 2) * (n - 4) * ...`.
    #[must_use]
    pub fn double_factorial(n: u64) -> Self {
        stepped_factorial(n, 2)
    }

    /// Computes the `k`-step multifactorial `n * (n - k) * (n - 2k) * ...`.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::InvalidStep`] if `k` is zero.
    pub fn multifactorial(n: u64, k: u64) -> NumResult<Self> {
        if k == 0 {
            return Err(NumError::InvalidStep);
        }
        Ok(stepped_factorial(n, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial() {
        assert_eq!(Integer::factorial(0).to_string(), "1");
        assert_eq!(Integer::factorial(1).to_string(), "1");
        assert_eq!(Integer::factorial(5).to_string(), "120");
        assert_eq!(Integer::factorial(20).to_string(), "2432902008176640000");
        assert_eq!(
            Integer::factorial(30).to_string(),
            "265252859812191058636308480000000"
        );
    }

    #[test]
    fn test_double_factorial() {
        assert_eq!(Integer::double_factorial(0).to_string(), "1");
        assert_eq!(Integer::double_factorial(7).to_string(), "105");
        assert_eq!(Integer::double_factorial(8).to_string(), "384");
    }

    #[test]
    fn test_multifactorial() {
        // 10 * 7 * 4 * 1
        assert_eq!(Integer::multifactorial(10, 3).unwrap().to_string(), "280");
        assert_eq!(Integer::multifactorial(2, 5).unwrap().to_string(), "2");
        assert_eq!(
            Integer::multifactorial(25, 1).unwrap(),
            Integer::factorial(25)
        );
        assert_eq!(Integer::multifactorial(5, 0), Err(NumError::InvalidStep));
    }
}
