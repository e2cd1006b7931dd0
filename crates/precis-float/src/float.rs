//! Binary floating point values with per-value precision.
//!
//! A [`BigFloat`] is `±significand × 2^exponent` where the significand has
//! at most `precision` bits. The significand is kept odd (or zero), so each
//! value has exactly one representation whatever its precision.
//!
//! Every operation computes enough bits of the exact result to round it to
//! nearest, ties to even, at the destination's precision.

#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use dashu::base::{BitTest, SquareRootRem};
use dashu::integer::UBig;
use precis_integers::{bits, Arithmetic, Integer, NumError, NumResult, Rational};

use crate::operand::Operand;
use crate::precision::{check_precision, FloatContext};

/// Bits computed beyond the target precision before a sticky rounding.
pub(crate) const GUARD_BITS: usize = 2;

/// Powers whose exact significand fits in this many bits skip the guarded
/// square-and-multiply loop.
const EXACT_POW_BITS: u64 = 1 << 16;

/// Bound on the binary exponent of any result built by `pow` or by scaling
/// text. Sums of two in-range exponents cannot overflow.
pub(crate) const MAX_EXPONENT: isize = isize::MAX / 4;

/// An arbitrary precision binary floating point number.
#[derive(Clone)]
pub struct BigFloat {
    precision: usize,
    negative: bool,
    significand: UBig,
    exponent: isize,
}

impl BigFloat {
    /// Creates zero with the given precision in bits.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroPrecision`] if `precision` is zero.
    pub fn new(precision: usize) -> NumResult<Self> {
        check_precision(precision)?;
        Ok(Self::zero_with(precision))
    }

    pub(crate) fn zero_with(precision: usize) -> Self {
        Self {
            precision,
            negative: false,
            significand: UBig::ZERO,
            exponent: 0,
        }
    }

    /// Rounds `±(mag + f) × 2^exp` to `precision` bits, where `sticky`
    /// marks a nonzero fraction `0 < f < 1`.
    ///
    /// `sticky` is only honoured when `mag` is wider than `precision`.
    pub(crate) fn from_parts(
        precision: usize,
        negative: bool,
        mag: UBig,
        exp: isize,
        sticky: bool,
    ) -> Self {
        if mag.is_zero() {
            return Self::zero_with(precision);
        }
        let len = mag.bit_len();
        let (mut mag, mut exp) = if len > precision {
            let shift = len - precision;
            (bits::round_shift(&mag, shift, sticky), exp + shift as isize)
        } else {
            (mag, exp)
        };
        let zeros = bits::trailing_zeros(&mag);
        if zeros > 0 {
            mag = mag >> zeros;
            exp += zeros as isize;
        }
        Self {
            precision,
            negative,
            significand: mag,
            exponent: exp,
        }
    }

    /// `value` exactly, at 64 bits.
    pub(crate) fn exact_u64(value: u64) -> Self {
        Self::from_parts(64, false, UBig::from(value), 0, false)
    }

    pub(crate) fn round_integer(value: &Integer, precision: usize) -> Self {
        Self::from_parts(precision, value.is_negative(), value.magnitude(), 0, false)
    }

    pub(crate) fn round_rational(value: &Rational, precision: usize) -> Self {
        if value.signum() == 0 {
            return Self::zero_with(precision);
        }
        let (q, exp, sticky) = bits::ratio_bits(
            &value.numerator().magnitude(),
            &value.denominator().magnitude(),
            precision + GUARD_BITS,
        );
        Self::from_parts(precision, value.is_negative(), q, exp, sticky)
    }

    pub(crate) fn round_f64(value: f64, precision: usize) -> NumResult<Self> {
        let (negative, mantissa, exp) = bits::decompose_f64(value).ok_or(NumError::NonFinite)?;
        Ok(Self::from_parts(
            precision,
            negative,
            UBig::from(mantissa),
            exp,
            false,
        ))
    }

    /// Converts an integer at the default precision.
    #[must_use]
    pub fn from_integer(value: &Integer) -> Self {
        FloatContext::ambient().from_integer(value)
    }

    /// Converts a rational at the default precision.
    #[must_use]
    pub fn from_rational(value: &Rational) -> Self {
        FloatContext::ambient().from_rational(value)
    }

    /// Converts an `i64` at the default precision.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        FloatContext::ambient().from_i64(value)
    }

    /// Converts a `u64` at the default precision.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        FloatContext::ambient().from_u64(value)
    }

    /// Converts an `f64` at the default precision.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NonFinite`] for NaN and infinities.
    pub fn from_f64(value: f64) -> NumResult<Self> {
        FloatContext::ambient().from_f64(value)
    }

    /// The precision in bits.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Changes the precision, rounding the current value to nearest when it
    /// shrinks. Growing the precision never changes the value.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroPrecision`] if `precision` is zero.
    pub fn set_precision(&mut self, precision: usize) -> NumResult<()> {
        check_precision(precision)?;
        if precision < self.significand.bit_len() {
            tracing::trace!(
                from = self.precision,
                to = precision,
                "re-rounding float to a narrower precision"
            );
            let mag = std::mem::take(&mut self.significand);
            *self = Self::from_parts(precision, self.negative, mag, self.exponent, false);
        } else {
            self.precision = precision;
        }
        Ok(())
    }

    /// Returns true for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.significand.is_zero()
    }

    /// Returns true for values below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    /// Returns true if the value has no fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.is_zero() || self.exponent >= 0
    }

    /// Returns true for the natural numbers `0, 1, 2, ...`.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        !self.negative && self.is_integer()
    }

    /// Position of the most significant bit; meaningless for zero.
    pub(crate) fn top(&self) -> isize {
        self.exponent + self.significand.bit_len() as isize - 1
    }

    pub(crate) fn significand(&self) -> &UBig {
        &self.significand
    }

    pub(crate) fn exponent(&self) -> isize {
        self.exponent
    }

    // Rounded kernels. Each returns a fresh value at `precision`.

    fn sum_rounded(precision: usize, a: &Self, b: &Self, subtract: bool) -> Self {
        let b_negative = b.negative != subtract;
        if b.is_zero() {
            return Self::from_parts(precision, a.negative, a.significand.clone(), a.exponent, false);
        }
        if a.is_zero() {
            return Self::from_parts(precision, b_negative, b.significand.clone(), b.exponent, false);
        }

        let (hi, hi_negative, lo, lo_negative) = if a.top() >= b.top() {
            (a, a.negative, b, b_negative)
        } else {
            (b, b_negative, a, a.negative)
        };

        // Below `floor` the smaller operand only decides the sticky bit.
        let floor = hi.exponent.min(hi.top() - precision as isize - 2);
        if lo.top() < floor {
            let mag = &hi.significand << (hi.exponent - floor) as usize;
            let mag = if hi_negative == lo_negative {
                mag
            } else {
                mag - UBig::ONE
            };
            return Self::from_parts(precision, hi_negative, mag, floor, true);
        }

        let base = hi.exponent.min(lo.exponent);
        let x = &hi.significand << (hi.exponent - base) as usize;
        let y = &lo.significand << (lo.exponent - base) as usize;
        if hi_negative == lo_negative {
            return Self::from_parts(precision, hi_negative, x + y, base, false);
        }
        match x.cmp(&y) {
            Ordering::Greater => Self::from_parts(precision, hi_negative, x - y, base, false),
            Ordering::Less => Self::from_parts(precision, lo_negative, y - x, base, false),
            Ordering::Equal => Self::zero_with(precision),
        }
    }

    pub(crate) fn product_rounded(precision: usize, a: &Self, b: &Self) -> Self {
        if a.is_zero() || b.is_zero() {
            return Self::zero_with(precision);
        }
        Self::from_parts(
            precision,
            a.negative != b.negative,
            &a.significand * &b.significand,
            a.exponent + b.exponent,
            false,
        )
    }

    pub(crate) fn quotient_rounded(precision: usize, a: &Self, b: &Self) -> NumResult<Self> {
        if b.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        if a.is_zero() {
            return Ok(Self::zero_with(precision));
        }
        let (q, exp, sticky) =
            bits::ratio_bits(&a.significand, &b.significand, precision + GUARD_BITS);
        Ok(Self::from_parts(
            precision,
            a.negative != b.negative,
            q,
            a.exponent - b.exponent + exp,
            sticky,
        ))
    }

    fn sqrt_rounded(precision: usize, x: &Self) -> NumResult<Self> {
        if x.negative && !x.is_zero() {
            return Err(NumError::NegativeSquareRoot);
        }
        if x.is_zero() {
            return Ok(Self::zero_with(precision));
        }
        // The root needs precision + guard bits and the exponent must be even.
        let mut shift = (2 * (precision + GUARD_BITS) + 2).saturating_sub(x.significand.bit_len());
        if (x.exponent - shift as isize).rem_euclid(2) != 0 {
            shift += 1;
        }
        let n = &x.significand << shift;
        let (root, rem) = n.sqrt_rem();
        let sticky = !rem.is_zero();
        Ok(Self::from_parts(
            precision,
            false,
            root,
            (x.exponent - shift as isize) / 2,
            sticky,
        ))
    }

    pub(crate) fn pow_rounded(precision: usize, base: &Self, exp: u64) -> NumResult<Self> {
        if exp == 0 {
            return Ok(Self::from_parts(precision, false, UBig::ONE, 0, false));
        }
        if base.is_zero() {
            return Ok(Self::zero_with(precision));
        }
        let negative = base.negative && exp % 2 == 1;

        // The result lies in [2^exponent, 2^(exponent + growth)).
        let width = base.significand.bit_len() as u64;
        let growth = if width == 1 {
            Some(0)
        } else {
            width.checked_mul(exp).and_then(|g| isize::try_from(g).ok())
        };
        let exponent = if base.exponent == 0 {
            Some(0)
        } else {
            isize::try_from(exp)
                .ok()
                .and_then(|e| base.exponent.checked_mul(e))
        };
        let (exponent, top) = exponent
            .zip(growth)
            .and_then(|(e, g)| Some((e, e.checked_add(g)?)))
            .filter(|&(e, t)| e.abs() <= MAX_EXPONENT && t.abs() <= MAX_EXPONENT)
            .ok_or(NumError::ExponentOverflow)?;
        tracing::trace!(exp, top, "raising float to a power");

        if width.saturating_mul(exp) <= EXACT_POW_BITS {
            let mag = base.significand.pow(exp as usize);
            return Ok(Self::from_parts(precision, negative, mag, exponent, false));
        }

        // Square-and-multiply on the significand with a widened precision;
        // every step loses at most half an ulp of the working precision.
        let steps = 64 - exp.leading_zeros() as usize;
        let working = precision + 2 * steps + GUARD_BITS;
        let unit = Self::from_parts(working, false, base.significand.clone(), 0, false);
        let mut acc = Self::from_parts(working, false, UBig::ONE, 0, false);
        for i in (0..steps).rev() {
            acc = Self::product_rounded(working, &acc, &acc);
            if (exp >> i) & 1 == 1 {
                acc = Self::product_rounded(working, &acc, &unit);
            }
        }
        Ok(Self::from_parts(
            precision,
            negative,
            acc.significand,
            acc.exponent + exponent,
            false,
        ))
    }

    // Destination operations. The result is rounded to `self`'s precision.

    /// Sets `self` to `lhs + rhs`.
    pub fn set_sum<'a, 'b>(&mut self, lhs: impl Into<Operand<'a>>, rhs: impl Into<Operand<'b>>) {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        *self = Self::sum_rounded(self.precision, &lhs.as_float(), &rhs.as_float(), false);
    }

    /// Sets `self` to `lhs - rhs`.
    pub fn set_difference<'a, 'b>(
        &mut self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'b>>,
    ) {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        *self = Self::sum_rounded(self.precision, &lhs.as_float(), &rhs.as_float(), true);
    }

    /// Sets `self` to `lhs * rhs`.
    pub fn set_product<'a, 'b>(
        &mut self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'b>>,
    ) {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        *self = Self::product_rounded(self.precision, &lhs.as_float(), &rhs.as_float());
    }

    /// Sets `self` to `lhs / rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::DivisionByZero`] if `rhs` is zero; `self` is left
    /// untouched in that case.
    pub fn set_quotient<'a, 'b>(
        &mut self,
        lhs: impl Into<Operand<'a>>,
        rhs: impl Into<Operand<'b>>,
    ) -> NumResult<()> {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        if rhs.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        *self = Self::quotient_rounded(self.precision, &lhs.as_float(), &rhs.as_float())?;
        Ok(())
    }

    /// Sets `self` to `-value`.
    pub fn set_negation<'a>(&mut self, value: impl Into<Operand<'a>>) {
        let value = value.into();
        let value = value.as_float();
        *self = Self::from_parts(
            self.precision,
            !value.negative,
            value.significand.clone(),
            value.exponent,
            false,
        );
    }

    /// Sets `self` to `|value|`.
    pub fn set_abs<'a>(&mut self, value: impl Into<Operand<'a>>) {
        let value = value.into();
        let value = value.as_float();
        *self = Self::from_parts(
            self.precision,
            false,
            value.significand.clone(),
            value.exponent,
            false,
        );
    }

    /// Sets `self` to the square root of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NegativeSquareRoot`] for a negative `value`.
    pub fn set_sqrt<'a>(&mut self, value: impl Into<Operand<'a>>) -> NumResult<()> {
        let value = value.into();
        *self = Self::sqrt_rounded(self.precision, &value.as_float())?;
        Ok(())
    }

    /// Sets `self` to `base^exp`. `x^0` is 1 for every `x`, zero included.
    ///
    /// Results whose exact significand is wider than 65536 bits come from a
    /// guarded square-and-multiply and are faithfully rounded.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ExponentOverflow`] when the binary exponent of the
    /// result is out of range; `self` is left untouched in that case.
    pub fn set_pow<'a>(&mut self, base: impl Into<Operand<'a>>, exp: u64) -> NumResult<()> {
        let base = base.into();
        *self = Self::pow_rounded(self.precision, &base.as_float(), exp)?;
        Ok(())
    }

    /// Returns the square root at `self`'s precision.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::NegativeSquareRoot`] for negative values.
    pub fn sqrt(&self) -> NumResult<Self> {
        Self::sqrt_rounded(self.precision, self)
    }

    /// Returns `self^exp` at `self`'s precision.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ExponentOverflow`] when the binary exponent of the
    /// result is out of range.
    pub fn pow(&self, exp: u64) -> NumResult<Self> {
        Self::pow_rounded(self.precision, self, exp)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            ..self.clone()
        }
    }

    /// Exact division at the wider of the two precisions.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::DivisionByZero`] if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> NumResult<Self> {
        Self::quotient_rounded(self.precision.max(rhs.precision), self, rhs)
    }

    // Conversions

    /// Rounds toward zero.
    #[must_use]
    pub fn trunc(&self) -> Integer {
        let mag = if self.exponent >= 0 {
            &self.significand << self.exponent.unsigned_abs()
        } else {
            &self.significand >> self.exponent.unsigned_abs()
        };
        Integer::from_sign_magnitude(self.negative, mag)
    }

    /// Truncates and converts to `i64` if the result fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.trunc().to_i64()
    }

    /// Truncates and converts to `u64` if the result fits.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.trunc().to_u64()
    }

    /// Truncates, then wraps modulo 2^64 like an `as` cast.
    #[must_use]
    pub fn wrapping_to_i64(&self) -> i64 {
        self.trunc().wrapping_to_i64()
    }

    /// Truncates, then keeps the low 64 bits of the magnitude.
    #[must_use]
    pub fn wrapping_to_u64(&self) -> u64 {
        self.trunc().wrapping_to_u64()
    }

    /// Converts to the nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        bits::compose_f64(self.negative, &self.significand, self.exponent, false)
    }

    /// The exact value as a rational.
    #[must_use]
    pub fn to_rational(&self) -> Rational {
        if self.is_integer() {
            return Rational::from(self.trunc());
        }
        let numerator = Integer::from_sign_magnitude(self.negative, self.significand.clone());
        let denominator = Integer::from(UBig::ONE << self.exponent.unsigned_abs());
        Rational::from(numerator) / Rational::from(denominator)
    }

    /// Three-way comparison of the values, ignoring precision.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.signum().cmp(&other.signum()).then_with(|| {
            if self.is_zero() {
                return Ordering::Equal;
            }
            let magnitude = self.top().cmp(&other.top()).then_with(|| {
                let base = self.exponent.min(other.exponent);
                let x = &self.significand << (self.exponent - base) as usize;
                let y = &other.significand << (other.exponent - base) as usize;
                x.cmp(&y)
            });
            if self.negative {
                magnitude.reverse()
            } else {
                magnitude
            }
        })
    }
}

impl Arithmetic for BigFloat {
    fn set_sum(&mut self, lhs: &Self, rhs: &Self) {
        *self = Self::sum_rounded(self.precision, lhs, rhs, false);
    }

    fn set_difference(&mut self, lhs: &Self, rhs: &Self) {
        *self = Self::sum_rounded(self.precision, lhs, rhs, true);
    }

    fn set_product(&mut self, lhs: &Self, rhs: &Self) {
        *self = Self::product_rounded(self.precision, lhs, rhs);
    }

    fn set_quotient(&mut self, lhs: &Self, rhs: &Self) -> NumResult<()> {
        *self = Self::quotient_rounded(self.precision, lhs, rhs)?;
        Ok(())
    }

    fn set_negation(&mut self, value: &Self) {
        BigFloat::set_negation(self, value);
    }

    fn set_abs(&mut self, value: &Self) {
        BigFloat::set_abs(self, value);
    }

    fn compare(&self, other: &Self) -> Ordering {
        BigFloat::compare(self, other)
    }
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for BigFloat {}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for BigFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.significand.hash(state);
        self.exponent.hash(state);
    }
}

// Exact comparisons against native values.

impl PartialEq<f64> for BigFloat {
    fn eq(&self, other: &f64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<f64> for BigFloat {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        if other.is_nan() {
            return None;
        }
        if other.is_infinite() {
            return Some(if *other > 0.0 {
                Ordering::Less
            } else {
                Ordering::Greater
            });
        }
        let other = Self::round_f64(*other, 64).ok()?;
        Some(self.compare(&other))
    }
}

impl PartialEq<i64> for BigFloat {
    fn eq(&self, other: &i64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<i64> for BigFloat {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.compare(&Self::round_integer(&Integer::new(*other), 64)))
    }
}

impl PartialEq<u64> for BigFloat {
    fn eq(&self, other: &u64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<u64> for BigFloat {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> {
        Some(self.compare(&Self::exact_u64(*other)))
    }
}

impl fmt::Debug for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigFloat({self}, precision = {})", self.precision)
    }
}

// Operators on references round at the wider operand precision.

impl Add for &BigFloat {
    type Output = BigFloat;

    fn add(self, rhs: Self) -> Self::Output {
        BigFloat::sum_rounded(self.precision.max(rhs.precision), self, rhs, false)
    }
}

impl Sub for &BigFloat {
    type Output = BigFloat;

    fn sub(self, rhs: Self) -> Self::Output {
        BigFloat::sum_rounded(self.precision.max(rhs.precision), self, rhs, true)
    }
}

impl Mul for &BigFloat {
    type Output = BigFloat;

    fn mul(self, rhs: Self) -> Self::Output {
        BigFloat::product_rounded(self.precision.max(rhs.precision), self, rhs)
    }
}

/// Division at the wider operand precision.
///
/// # Panics
///
/// Panics if `rhs` is zero. Use [`BigFloat::checked_div`] or
/// [`BigFloat::set_quotient`] to get an error instead.
impl Div for &BigFloat {
    type Output = BigFloat;

    fn div(self, rhs: Self) -> Self::Output {
        match self.checked_div(rhs) {
            Ok(q) => q,
            Err(e) => panic!("{e}"),
        }
    }
}

macro_rules! forward_owned_binop {
    ($($trait:ident::$method:ident),*) => {$(
        impl $trait for BigFloat {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&BigFloat> for BigFloat {
            type Output = Self;

            fn $method(self, rhs: &BigFloat) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    )*};
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul, Div::div);

impl Neg for &BigFloat {
    type Output = BigFloat;

    fn neg(self) -> Self::Output {
        BigFloat {
            negative: !self.negative && !self.is_zero(),
            ..self.clone()
        }
    }
}

impl Neg for BigFloat {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.negative = !self.negative && !self.is_zero();
        self
    }
}
