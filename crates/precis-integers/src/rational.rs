//! Arbitrary precision rational numbers.
//!
//! This module provides exact rational arithmetic. Values are kept as a
//! numerator/denominator pair of [`Integer`]s in canonical form: lowest
//! terms with a positive denominator.

use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use dashu::integer::UBig;

use crate::bits;
use crate::error::{NumError, NumResult};
use crate::radix;
use crate::traits::Arithmetic;
use crate::Integer;

/// An arbitrary precision rational number.
///
/// Rationals are stored in lowest terms with a positive denominator. The
/// only way to hold a non-canonical pair is
/// [`Rational::from_parts_unreduced`]; every other constructor and every
/// operation returns canonical values.
#[derive(Clone)]
pub struct Rational {
    numerator: Integer,
    denominator: Integer,
}

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroDenominator`] if the denominator is zero.
    pub fn new(numerator: Integer, denominator: Integer) -> NumResult<Self> {
        let mut r = Self::from_parts_unreduced(numerator, denominator)?;
        r.canonicalize();
        Ok(r)
    }

    /// Stores a numerator/denominator pair without reducing it.
    ///
    /// Call [`Rational::canonicalize`] to bring the pair into lowest terms.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroDenominator`] if the denominator is zero.
    pub fn from_parts_unreduced(numerator: Integer, denominator: Integer) -> NumResult<Self> {
        if denominator.is_zero() {
            return Err(NumError::ZeroDenominator);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Canonicalizes a pair whose denominator is known to be nonzero.
    fn reduced(numerator: Integer, denominator: Integer) -> Self {
        let mut r = Self {
            numerator,
            denominator,
        };
        r.canonicalize();
        r
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self {
            numerator: n,
            denominator: Integer::one(),
        }
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroDenominator`] if the denominator is zero.
    pub fn from_i64(numerator: i64, denominator: i64) -> NumResult<Self> {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Creates a rational from u64 numerator and denominator.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroDenominator`] if the denominator is zero.
    pub fn from_u64(numerator: u64, denominator: u64) -> NumResult<Self> {
        Self::new(Integer::from(numerator), Integer::from(denominator))
    }

    /// Converts an `f64` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NonFinite`] for NaN and infinities.
    pub fn from_f64(value: f64) -> NumResult<Self> {
        let (negative, mantissa, exp) = bits::decompose_f64(value).ok_or(NumError::NonFinite)?;
        let mantissa = UBig::from(mantissa);
        let (num, den) = if exp >= 0 {
            (mantissa << exp.unsigned_abs(), UBig::ONE)
        } else {
            (mantissa, UBig::ONE << exp.unsigned_abs())
        };
        Ok(Self::reduced(
            Integer::from_sign_magnitude(negative, num),
            Integer::from(den),
        ))
    }

    /// Parses `"n"` or `"n/d"` in the given base.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported base, malformed text (including an
    /// empty numerator or denominator), or a zero denominator.
    pub fn from_str_radix(s: &str, base: u32) -> NumResult<Self> {
        radix::check_base(base)?;
        let part = |text: &str| {
            Integer::from_str_radix(text, base).map_err(|_| NumError::malformed(s, base))
        };
        match s.split_once('/') {
            Some((num, den)) => Self::new(part(num)?, part(den)?),
            None => Ok(Self::from_integer(part(s)?)),
        }
    }

    /// Formats as `"n/d"` in the given base, or `"n"` when the denominator
    /// is 1.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::UnsupportedBase`] outside `2..=62`.
    pub fn to_str_radix(&self, base: u32) -> NumResult<String> {
        let canonical = self.canonical();
        let numerator = canonical.numerator.to_str_radix(base)?;
        if canonical.denominator.is_one() {
            return Ok(numerator);
        }
        Ok(format!(
            "{numerator}/{}",
            canonical.denominator.to_str_radix(base)?
        ))
    }

    /// Brings the pair into lowest terms with a positive denominator.
    ///
    /// Canonicalizing a canonical value leaves it unchanged.
    pub fn canonicalize(&mut self) {
        if self.denominator.is_negative() {
            self.numerator = -&self.numerator;
            self.denominator = -&self.denominator;
        }
        let g = self.numerator.gcd(&self.denominator);
        if !g.is_one() {
            self.numerator = &self.numerator / &g;
            self.denominator = &self.denominator / &g;
        }
    }

    /// Returns true if the pair is in lowest terms with a positive
    /// denominator.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.denominator.signum() > 0 && self.numerator.gcd(&self.denominator).is_one()
    }

    fn canonical(&self) -> Self {
        let mut r = self.clone();
        r.canonicalize();
        r
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> &Integer {
        &self.numerator
    }

    /// Returns the denominator.
    #[must_use]
    pub fn denominator(&self) -> &Integer {
        &self.denominator
    }

    /// Splits into `(numerator, denominator)`.
    #[must_use]
    pub fn into_parts(self) -> (Integer, Integer) {
        (self.numerator, self.denominator)
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        (&self.numerator % &self.denominator).is_zero()
    }

    /// Returns true for the natural numbers `0, 1, 2, ...`.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        !self.is_negative() && self.is_integer()
    }

    /// Converts to an integer if the value is integral.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        self.is_integer()
            .then(|| &self.numerator / &self.denominator)
    }

    /// Rounds toward zero.
    #[must_use]
    pub fn trunc(&self) -> Integer {
        &self.numerator / &self.denominator
    }

    /// Rounds toward negative infinity.
    #[must_use]
    pub fn floor(&self) -> Integer {
        let q = self.trunc();
        if self.is_negative() && !self.is_integer() {
            q - Integer::one()
        } else {
            q
        }
    }

    /// Rounds toward positive infinity.
    #[must_use]
    pub fn ceil(&self) -> Integer {
        let q = self.trunc();
        if self.signum() > 0 && !self.is_integer() {
            q + Integer::one()
        } else {
            q
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::reduced(self.numerator.abs(), self.denominator.abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Errors
    ///
    /// Returns [`NumError::DivisionByZero`] if the rational is zero.
    pub fn recip(&self) -> NumResult<Self> {
        if self.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self::reduced(
            self.denominator.clone(),
            self.numerator.clone(),
        ))
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        self.numerator.signum() * self.denominator.signum()
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.signum() < 0
    }

    /// Computes self^exp; negative exponents invert first.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::DivisionByZero`] for a negative power of zero.
    pub fn pow(&self, exp: i32) -> NumResult<Self> {
        let base = if exp < 0 { self.recip()? } else { self.clone() };
        let exp = exp.unsigned_abs();
        Ok(Self::reduced(
            base.numerator.pow(exp),
            base.denominator.pow(exp),
        ))
    }

    /// Exact division.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::DivisionByZero`] if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> NumResult<Self> {
        if rhs.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self::reduced(
            &self.numerator * &rhs.denominator,
            &self.denominator * &rhs.numerator,
        ))
    }

    /// Three-way comparison by cross-multiplication.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        let lhs = &self.numerator * &other.denominator;
        let rhs = &other.numerator * &self.denominator;
        let ordering = lhs.cmp(&rhs);
        if self.denominator.is_negative() == other.denominator.is_negative() {
            ordering
        } else {
            ordering.reverse()
        }
    }

    /// Converts to the nearest `f64` (ties to even).
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let (q, exp, sticky) = bits::ratio_bits(
            &self.numerator.magnitude(),
            &self.denominator.magnitude(),
            66,
        );
        bits::compose_f64(self.is_negative(), &q, exp, sticky)
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::from_integer(Integer::zero())
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::from_integer(Integer::one())
    }

    fn is_one(&self) -> bool {
        self.numerator == self.denominator
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Rational {}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_canonical() {
            self.numerator.hash(state);
            self.denominator.hash(state);
        } else {
            let canonical = self.canonical();
            canonical.numerator.hash(state);
            canonical.denominator.hash(state);
        }
    }
}

impl Arithmetic for Rational {
    fn set_sum(&mut self, lhs: &Self, rhs: &Self) {
        *self = lhs + rhs;
    }

    fn set_difference(&mut self, lhs: &Self, rhs: &Self) {
        *self = lhs - rhs;
    }

    fn set_product(&mut self, lhs: &Self, rhs: &Self) {
        *self = lhs * rhs;
    }

    fn set_quotient(&mut self, lhs: &Self, rhs: &Self) -> NumResult<()> {
        *self = lhs.checked_div(rhs)?;
        Ok(())
    }

    fn set_negation(&mut self, value: &Self) {
        *self = -value;
    }

    fn set_abs(&mut self, value: &Self) {
        *self = value.abs();
    }

    fn compare(&self, other: &Self) -> Ordering {
        Rational::compare(self, other)
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({}/{})", self.numerator, self.denominator)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let canonical = self.canonical();
        if canonical.denominator.is_one() {
            write!(f, "{}", canonical.numerator)
        } else {
            write!(f, "{}/{}", canonical.numerator, canonical.denominator)
        }
    }
}

impl FromStr for Rational {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

// Arithmetic operations
impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational::reduced(
            &self.numerator * &rhs.denominator + &rhs.numerator * &self.denominator,
            &self.denominator * &rhs.denominator,
        )
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational::reduced(
            &self.numerator * &rhs.denominator - &rhs.numerator * &self.denominator,
            &self.denominator * &rhs.denominator,
        )
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational::reduced(
            &self.numerator * &rhs.numerator,
            &self.denominator * &rhs.denominator,
        )
    }
}

/// Exact division.
///
/// # Panics
///
/// Panics if `rhs` is zero. Use [`Rational::checked_div`] to get an error
/// instead.
impl Div for &Rational {
    type Output = Rational;

    fn div(self, rhs: Self) -> Self::Output {
        match self.checked_div(rhs) {
            Ok(q) => q,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Forwards the owned operator forms to the by-reference implementation.
macro_rules! forward_owned_binop {
    ($($trait:ident::$method:ident),*) => {$(
        impl $trait for Rational {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&Rational> for Rational {
            type Output = Self;

            fn $method(self, rhs: &Rational) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    )*};
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul, Div::div);

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::reduced(-self.numerator, self.denominator)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational::reduced(-&self.numerator, self.denominator.clone())
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::new(i64::from(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d).unwrap()
    }

    #[test]
    fn test_basic_ops() {
        let a = q(1, 2);
        let b = q(1, 3);

        // 1/2 + 1/3 = 5/6
        let sum = a.clone() + b.clone();
        assert_eq!(sum.numerator().to_i64(), Some(5));
        assert_eq!(sum.denominator().to_i64(), Some(6));

        // 1/2 * 1/3 = 1/6
        let prod = a.clone() * b.clone();
        assert_eq!(prod.numerator().to_i64(), Some(1));
        assert_eq!(prod.denominator().to_i64(), Some(6));

        // 1/2 - 1/3 = 1/6, (1/2) / (1/3) = 3/2
        assert_eq!(&a - &b, q(1, 6));
        assert_eq!(a / b, q(3, 2));
    }

    #[test]
    fn test_reduction() {
        // 4/8 should reduce to 1/2
        let r = q(4, 8);
        assert_eq!(r.numerator().to_i64(), Some(1));
        assert_eq!(r.denominator().to_i64(), Some(2));

        // The sign moves to the numerator.
        let r = q(3, -6);
        assert_eq!(r.numerator().to_i64(), Some(-1));
        assert_eq!(r.denominator().to_i64(), Some(2));

        let zero = q(0, -5);
        assert_eq!(zero.denominator().to_i64(), Some(1));
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Rational::from_i64(1, 0), Err(NumError::ZeroDenominator));
        assert_eq!(
            Rational::from_str_radix("1/0", 10),
            Err(NumError::ZeroDenominator)
        );
        assert_eq!(q(1, 2).checked_div(&q(0, 1)), Err(NumError::DivisionByZero));
        assert_eq!(q(0, 1).recip(), Err(NumError::DivisionByZero));
    }

    #[test]
    fn test_canonicalize_explicitly() {
        let mut r = Rational::from_parts_unreduced(Integer::new(6), Integer::new(-4)).unwrap();
        assert!(!r.is_canonical());
        // Unreduced values still compare and print by value.
        assert_eq!(r, q(-3, 2));
        assert_eq!(r.to_string(), "-3/2");

        r.canonicalize();
        assert!(r.is_canonical());
        assert_eq!(r.numerator(), &Integer::new(-3));
        assert_eq!(r.denominator(), &Integer::new(2));

        let before = r.clone().into_parts();
        r.canonicalize();
        assert_eq!(r.into_parts(), before);
    }

    #[test]
    fn test_compare() {
        assert_eq!(q(1, 3).compare(&q(2, 6)), Ordering::Equal);
        assert_eq!(q(1, 3).compare(&q(1, 2)), Ordering::Less);
        assert_eq!(q(-1, 2).compare(&q(-2, 3)), Ordering::Greater);

        let odd = Rational::from_parts_unreduced(Integer::new(1), Integer::new(-3)).unwrap();
        assert_eq!(odd.compare(&q(0, 1)), Ordering::Less);
        assert_eq!(q(0, 1).compare(&odd), Ordering::Greater);
    }

    #[test]
    fn test_text() {
        assert_eq!(q(3, 1).to_string(), "3");
        assert_eq!(q(2, 3).to_string(), "2/3");
        assert_eq!(q(-255, 16).to_str_radix(16).unwrap(), "-ff/10");
        assert_eq!(Rational::from_str_radix("-ff/10", 16).unwrap(), q(-255, 16));
        assert_eq!("6/4".parse::<Rational>().unwrap(), q(3, 2));
        assert_eq!("7".parse::<Rational>().unwrap(), q(7, 1));

        for bad in ["", "/", "1/", "/2", "1/2/3", "a/2", "1 /2"] {
            assert!(
                matches!(bad.parse::<Rational>(), Err(NumError::Malformed { .. })),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(
            Rational::from_str_radix("1/2", 99),
            Err(NumError::UnsupportedBase(99))
        );
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(q(1, 3).to_f64(), 1.0 / 3.0);
        assert_eq!(q(-7, 8).to_f64(), -0.875);
        assert_eq!(q(0, 1).to_f64(), 0.0);
        let huge = Rational::new(Integer::new(10).pow(400), Integer::new(3)).unwrap();
        assert_eq!(huge.to_f64(), f64::INFINITY);
        let tiny = Rational::new(Integer::new(1), Integer::new(10).pow(400)).unwrap();
        assert_eq!(tiny.to_f64(), 0.0);
    }

    #[test]
    fn test_from_f64_is_exact() {
        let r = Rational::from_f64(0.1).unwrap();
        assert_eq!(r.denominator(), &Integer::new(2).pow(55));
        assert_eq!(r.to_f64(), 0.1);
        assert_eq!(Rational::from_f64(-2.5).unwrap(), q(-5, 2));
        assert_eq!(Rational::from_f64(f64::NAN), Err(NumError::NonFinite));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(q(7, 2).floor(), Integer::new(3));
        assert_eq!(q(7, 2).ceil(), Integer::new(4));
        assert_eq!(q(-7, 2).floor(), Integer::new(-4));
        assert_eq!(q(-7, 2).ceil(), Integer::new(-3));
        assert_eq!(q(-7, 2).trunc(), Integer::new(-3));
        assert_eq!(q(6, 2).to_integer(), Some(Integer::new(3)));
        assert_eq!(q(7, 2).to_integer(), None);
    }

    #[test]
    fn test_is_natural() {
        assert!(q(6, 2).is_natural());
        assert!(q(0, 5).is_natural());
        assert!(!q(-6, 2).is_natural());
        assert!(!q(7, 2).is_natural());
        let unreduced = Rational::from_parts_unreduced(Integer::new(-6), Integer::new(-3)).unwrap();
        assert!(unreduced.is_natural());
    }

    #[test]
    fn test_sign_operations_canonicalize() {
        let raw = || Rational::from_parts_unreduced(Integer::new(6), Integer::new(-4)).unwrap();
        assert!(!raw().is_canonical());

        let mut out = Rational::default();
        out.set_negation(&raw());
        assert!(out.is_canonical());
        assert_eq!(out.numerator(), &Integer::new(3));
        assert_eq!(out.denominator(), &Integer::new(2));

        let negated = -raw();
        assert!(negated.is_canonical());
        assert_eq!(negated, q(3, 2));
        assert!((-&raw()).is_canonical());

        out.set_abs(&raw());
        assert!(out.is_canonical());
        assert_eq!(out, q(3, 2));
        assert!(raw().abs().is_canonical());
    }

    #[test]
    fn test_pow() {
        assert_eq!(q(2, 3).pow(3).unwrap(), q(8, 27));
        assert_eq!(q(2, 3).pow(-2).unwrap(), q(9, 4));
        assert_eq!(q(-2, 3).pow(0).unwrap(), q(1, 1));
        assert_eq!(q(0, 1).pow(-1), Err(NumError::DivisionByZero));
    }
}
