//! Shared arithmetic vocabulary.
//!
//! `Integer`, `Rational` and `BigFloat` share one operation vocabulary but no
//! representation. [`Arithmetic`] is the destination-writing form of that
//! vocabulary, so generic code can drive any of the three types.

use std::cmp::Ordering;

use crate::error::NumResult;

/// Arithmetic that writes its result into an existing value.
///
/// Every `set_*` method computes into a temporary and only then replaces
/// `self`, so callers may pass clones of the destination as operands. The
/// `*_in_place` helpers cover the `x = x op y` shape directly.
///
/// # Laws
///
/// - `set_sum` and `set_product` are commutative
/// - `compare` is a total order on mathematical values; two values are
///   equal exactly when `compare` returns `Ordering::Equal`
pub trait Arithmetic: Clone {
    /// Sets `self` to `lhs + rhs`.
    fn set_sum(&mut self, lhs: &Self, rhs: &Self);

    /// Sets `self` to `lhs - rhs`.
    fn set_difference(&mut self, lhs: &Self, rhs: &Self);

    /// Sets `self` to `lhs * rhs`.
    fn set_product(&mut self, lhs: &Self, rhs: &Self);

    /// Sets `self` to `lhs / rhs`.
    ///
    /// # Errors
    ///
    /// Returns `NumError::DivisionByZero` if `rhs` is zero. The destination
    /// is left unspecified in that case.
    fn set_quotient(&mut self, lhs: &Self, rhs: &Self) -> NumResult<()>;

    /// Sets `self` to `-value`.
    fn set_negation(&mut self, value: &Self);

    /// Sets `self` to `|value|`.
    fn set_abs(&mut self, value: &Self);

    /// Three-way comparison of mathematical values.
    fn compare(&self, other: &Self) -> Ordering;

    /// Returns true if both values are mathematically equal.
    fn equals(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Computes `self += rhs`.
    fn add_in_place(&mut self, rhs: &Self) {
        let lhs = self.clone();
        self.set_sum(&lhs, rhs);
    }

    /// Computes `self -= rhs`.
    fn sub_in_place(&mut self, rhs: &Self) {
        let lhs = self.clone();
        self.set_difference(&lhs, rhs);
    }

    /// Computes `self *= rhs`.
    fn mul_in_place(&mut self, rhs: &Self) {
        let lhs = self.clone();
        self.set_product(&lhs, rhs);
    }

    /// Computes `self /= rhs`.
    ///
    /// # Errors
    ///
    /// Returns `NumError::DivisionByZero` if `rhs` is zero.
    fn div_in_place(&mut self, rhs: &Self) -> NumResult<()> {
        let lhs = self.clone();
        self.set_quotient(&lhs, rhs)
    }

    /// Negates `self`.
    fn negate_in_place(&mut self) {
        let value = self.clone();
        self.set_negation(&value);
    }

    /// Replaces `self` with its absolute value.
    fn abs_in_place(&mut self) {
        let value = self.clone();
        self.set_abs(&value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Integer, Rational};

    fn sum_all<T: Arithmetic>(start: T, values: &[T]) -> T {
        let mut acc = start;
        for v in values {
            acc.add_in_place(v);
        }
        acc
    }

    #[test]
    fn test_generic_driver() {
        let ints = [Integer::new(1), Integer::new(2), Integer::new(3)];
        assert_eq!(sum_all(Integer::new(0), &ints), Integer::new(6));

        let rats = [
            Rational::from_i64(1, 2).unwrap(),
            Rational::from_i64(1, 3).unwrap(),
            Rational::from_i64(1, 6).unwrap(),
        ];
        let total = sum_all(Rational::from_i64(0, 1).unwrap(), &rats);
        assert!(total.equals(&Rational::from_i64(1, 1).unwrap()));
    }

    #[test]
    fn test_destination_may_equal_operand() {
        let mut x = Integer::new(7);
        let copy = x.clone();
        x.set_product(&copy, &copy);
        assert_eq!(x, Integer::new(49));

        x.negate_in_place();
        x.abs_in_place();
        assert_eq!(x, Integer::new(49));
        assert!(x.div_in_place(&Integer::new(0)).is_err());
    }
}
