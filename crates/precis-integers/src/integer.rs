//! Arbitrary precision integers.
//!
//! This module provides a wrapper around `dashu::IBig` with the
//! conversions, base-N text I/O and number-theoretic helpers the rest of
//! the workspace builds on.

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned, SquareRoot, UnsignedAbs};
use dashu::integer::{IBig, UBig};
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use crate::bits;
use crate::error::{NumError, NumResult};
use crate::radix;
use crate::traits::Arithmetic;

/// An arbitrary precision integer.
///
/// This type wraps `dashu::IBig`. Zero has a single representation and
/// values never carry leading zero limbs.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Builds an integer from a sign flag and a magnitude.
    #[must_use]
    pub fn from_sign_magnitude(negative: bool, magnitude: UBig) -> Self {
        let value = IBig::from(magnitude);
        Self(if negative { -value } else { value })
    }

    /// Converts an `f64`, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NonFinite`] for NaN and infinities.
    pub fn from_f64(value: f64) -> NumResult<Self> {
        let (negative, mantissa, exp) = bits::decompose_f64(value).ok_or(NumError::NonFinite)?;
        let mantissa = UBig::from(mantissa);
        let magnitude = if exp >= 0 {
            mantissa << exp.unsigned_abs()
        } else {
            mantissa >> exp.unsigned_abs()
        };
        Ok(Self::from_sign_magnitude(negative, magnitude))
    }

    /// Creates an integer from a string in the given base.
    ///
    /// Accepts an optional `-` or `+` followed by at least one digit of
    /// `base` (2 to 62).
    ///
    /// # Errors
    ///
    /// Returns an error if the base is unsupported or the string is not a
    /// valid integer in that base.
    pub fn from_str_radix(s: &str, base: u32) -> NumResult<Self> {
        radix::check_base(base)?;
        let (negative, digits) = radix::split_sign(s);
        let magnitude =
            radix::parse_magnitude(digits, base).ok_or_else(|| NumError::malformed(s, base))?;
        Ok(Self::from_sign_magnitude(negative, magnitude))
    }

    /// Formats this integer in the given base.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::UnsupportedBase`] outside `2..=62`.
    pub fn to_str_radix(&self, base: u32) -> NumResult<String> {
        radix::check_base(base)?;
        let digits = radix::format_magnitude(&self.magnitude(), base);
        Ok(if self.is_negative() {
            format!("-{digits}")
        } else {
            digits
        })
    }

    /// Number of digits of `|self|` in the given base; zero has one digit.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::UnsupportedBase`] outside `2..=62`.
    pub fn size_in_base(&self, base: u32) -> NumResult<usize> {
        radix::check_base(base)?;
        let magnitude = self.magnitude();
        if base.is_power_of_two() {
            let bits_per_digit = base.trailing_zeros() as usize;
            return Ok(magnitude.bit_len().div_ceil(bits_per_digit).max(1));
        }
        Ok(radix::to_digits(&magnitude, base).len())
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns `|self|` as an unsigned big integer.
    #[must_use]
    pub fn magnitude(&self) -> UBig {
        self.0.clone().unsigned_abs()
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true for the natural numbers `0, 1, 2, ...`.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        !self.is_negative()
    }

    /// Returns the number of bits needed to represent `|self|`.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.magnitude().bit_len()
    }

    /// Computes the greatest common divisor (always non-negative).
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Computes the least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self(&self.0 / &g.0 * &other.0).abs()
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Attempts to convert to an i64.
    ///
    /// Returns `None` if the value doesn't fit in an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Attempts to convert to a u64.
    ///
    /// Returns `None` if the value is negative or doesn't fit in a u64.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        let magnitude = self.magnitude();
        (!self.is_negative() && magnitude.bit_len() <= 64).then(|| bits::low_u64(&magnitude))
    }

    /// Converts to an i64, wrapping modulo 2^64 like an `as` cast.
    #[must_use]
    pub fn wrapping_to_i64(&self) -> i64 {
        let low = bits::low_u64(&self.magnitude());
        if self.is_negative() {
            low.wrapping_neg() as i64
        } else {
            low as i64
        }
    }

    /// Returns the low 64 bits of `|self|`; the sign is ignored.
    #[must_use]
    pub fn wrapping_to_u64(&self) -> u64 {
        bits::low_u64(&self.magnitude())
    }

    /// Converts to the nearest `f64` (ties to even).
    ///
    /// Values beyond the `f64` range become infinities.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        bits::compose_f64(self.is_negative(), &self.magnitude(), 0, false)
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Truncating division.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::DivisionByZero`] if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> NumResult<Self> {
        if rhs.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self(&self.0 / &rhs.0))
    }

    /// Remainder of truncating division; carries the sign of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::DivisionByZero`] if `rhs` is zero.
    pub fn checked_rem(&self, rhs: &Self) -> NumResult<Self> {
        if rhs.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        Ok(Self(&self.0 % &rhs.0))
    }

    /// Truncating quotient and remainder together.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::DivisionByZero`] if `rhs` is zero.
    pub fn div_rem(&self, rhs: &Self) -> NumResult<(Self, Self)> {
        Ok((self.checked_div(rhs)?, self.checked_rem(rhs)?))
    }

    /// Floor of the square root.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NegativeSquareRoot`] for negative values.
    pub fn sqrt(&self) -> NumResult<Self> {
        if self.is_negative() {
            return Err(NumError::NegativeSquareRoot);
        }
        Ok(Self(IBig::from(self.magnitude().sqrt())))
    }

    /// Three-way comparison; equality is `Ordering::Equal`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl Arithmetic for Integer {
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
        self.cmp(other)
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({self})")
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = radix::format_magnitude(&self.magnitude(), 10);
        f.pad_integral(!self.is_negative(), "", &digits)
    }
}

impl FromStr for Integer {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

// Arithmetic operations
impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Integer> for Integer {
    type Output = Self;

    fn add(self, rhs: &Integer) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Integer {
    type Output = Integer;

    fn add(self, rhs: Self) -> Self::Output {
        Integer(&self.0 + &rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Integer> for Integer {
    type Output = Self;

    fn sub(self, rhs: &Integer) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Integer {
    type Output = Integer;

    fn sub(self, rhs: Self) -> Self::Output {
        Integer(&self.0 - &rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Integer> for Integer {
    type Output = Self;

    fn mul(self, rhs: &Integer) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Integer {
    type Output = Integer;

    fn mul(self, rhs: Self) -> Self::Output {
        Integer(&self.0 * &rhs.0)
    }
}

/// Truncating division.
///
/// # Panics
///
/// Panics if `rhs` is zero, like primitive integer division. Use
/// [`Integer::checked_div`] to get an error instead.
impl Div for Integer {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div<&Integer> for Integer {
    type Output = Self;

    fn div(self, rhs: &Integer) -> Self::Output {
        Self(self.0 / &rhs.0)
    }
}

impl Div for &Integer {
    type Output = Integer;

    fn div(self, rhs: Self) -> Self::Output {
        Integer(&self.0 / &rhs.0)
    }
}

impl Rem for Integer {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        Self(self.0 % rhs.0)
    }
}

impl Rem for &Integer {
    type Output = Integer;

    fn rem(self, rhs: Self) -> Self::Output {
        Integer(&self.0 % &rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

impl From<UBig> for Integer {
    fn from(value: UBig) -> Self {
        Self(IBig::from(value))
    }
}
