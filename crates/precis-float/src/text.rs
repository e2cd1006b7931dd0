//! Text conversion for floats in bases 2 through 62.
//!
//! The digit form is `0.ddd… × base^exponent`, returned as a digit string
//! and a separate exponent. Parsing accepts `[-|+]digits[.digits][@exp]`
//! where `exp` is a decimal power of `base`; bases up to 10 also accept
//! `e`/`E` as the exponent marker.

#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use dashu::base::BitTest;
use dashu::integer::UBig;
use precis_integers::{bits, radix, NumError, NumResult};

use crate::float::{GUARD_BITS, MAX_EXPONENT};
use crate::precision::{check_precision, default_precision};
use crate::BigFloat;

/// Largest power of the base, in bits, that scaling builds exactly.
const EXACT_SCALE_BITS: f64 = (1u64 << 20) as f64;

/// Bits in `base^|k|`, approximately.
fn power_bits(base: u32, k: i64) -> f64 {
    k.unsigned_abs() as f64 * f64::from(base).log2()
}

/// Digits needed to round-trip a `precision`-bit value in `base`.
fn round_trip_digits(precision: usize, base: u32) -> usize {
    1 + (precision as f64 / f64::from(base).log2()).ceil() as usize
}

/// First guess at `floor(log_base |x|) + 1` for `|x|` in `[2^top, 2^(top+1))`.
fn estimate_exponent(top: isize, base: u32) -> i64 {
    (top as f64 / f64::from(base).log2()).floor() as i64 + 1
}

/// Splits off the exponent part, if any.
fn split_exponent(body: &str, base: u32) -> (&str, Option<&str>) {
    let marker = body
        .find('@')
        .or_else(|| (base <= 10).then(|| body.find(|c| c == 'e' || c == 'E')).flatten());
    match marker {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    }
}

impl BigFloat {
    /// Parses text in `base` and rounds it to `precision` bits.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::UnsupportedBase`] outside `2..=62`,
    /// [`NumError::ZeroPrecision`] for a zero precision and
    /// [`NumError::Malformed`] when the text does not match
    /// `[-|+]digits[.digits][@exp]`.
    ///
    /// # Example
    ///
    /// ```
    /// use precis_float::BigFloat;
    ///
    /// let x = BigFloat::from_str_radix("-ff.8@-1", 16, 64).unwrap();
    /// assert_eq!(x, -15.96875);
    /// ```
    pub fn from_str_radix(text: &str, base: u32, precision: usize) -> NumResult<Self> {
        radix::check_base(base)?;
        check_precision(precision)?;
        let malformed = || NumError::malformed(text, base);

        let (negative, body) = radix::split_sign(text);
        let (mantissa, exponent) = split_exponent(body, base);
        let exponent: i64 = match exponent {
            Some(e) => e.parse().map_err(|_| malformed())?,
            None => 0,
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed());
        }
        let digits = [int_part, frac_part].concat();
        let mag = radix::parse_magnitude(&digits, base).ok_or_else(malformed)?;
        let scale = i64::try_from(frac_part.len())
            .ok()
            .and_then(|len| exponent.checked_sub(len))
            .ok_or_else(malformed)?;

        if mag.is_zero() {
            return Ok(Self::zero_with(precision));
        }
        let exact = Self::from_parts(mag.bit_len(), negative, mag, 0, false);
        exact.scaled(base, scale, precision)
    }

    /// `self × base^k` rounded to `precision` bits.
    ///
    /// Powers of up to `EXACT_SCALE_BITS` bits are built exactly and the
    /// result is correctly rounded. Larger ones come from the guarded power
    /// kernel and the result is faithfully rounded.
    fn scaled(&self, base: u32, k: i64, precision: usize) -> NumResult<Self> {
        let bits_needed = power_bits(base, k);
        if bits_needed > MAX_EXPONENT as f64 {
            return Err(NumError::ExponentOverflow);
        }
        if bits_needed <= EXACT_SCALE_BITS {
            let power = UBig::from(base).pow(k.unsigned_abs() as usize);
            let (negative, sig, exp) = (self.is_negative(), self.significand(), self.exponent());
            if k >= 0 {
                return Ok(Self::from_parts(precision, negative, sig * power, exp, false));
            }
            let (q, shift, sticky) = bits::ratio_bits(sig, &power, precision + GUARD_BITS);
            return Ok(Self::from_parts(precision, negative, q, exp + shift, sticky));
        }

        let working = precision + 64;
        let power = Self::pow_rounded(working, &Self::exact_u64(u64::from(base)), k.unsigned_abs())?;
        let result = if k >= 0 {
            Self::product_rounded(precision, self, &power)
        } else {
            Self::quotient_rounded(precision, self, &power)?
        };
        if result.is_zero() || result.top().abs() <= MAX_EXPONENT {
            Ok(result)
        } else {
            Err(NumError::ExponentOverflow)
        }
    }

    /// Formats as `(digits, exponent)` with `self ≈ 0.digits × base^exponent`.
    ///
    /// At most `max_digits` significant digits are produced, rounded to
    /// nearest; `0` asks for enough digits to read the value back exactly at
    /// its precision. Trailing zeros are dropped and negative values carry a
    /// leading `-`. Zero is `("0", 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::UnsupportedBase`] outside `2..=62`.
    /// [`NumError::ExponentOverflow`] is only possible for values near the
    /// edge of the exponent range.
    pub fn to_str_radix(&self, base: u32, max_digits: usize) -> NumResult<(String, i64)> {
        radix::check_base(base)?;
        if self.is_zero() {
            return Ok(("0".to_owned(), 0));
        }
        let count = if max_digits == 0 {
            round_trip_digits(self.precision(), base)
        } else {
            max_digits
        };

        let big_base = UBig::from(base);
        let upper = big_base.pow(count);
        let lower = big_base.pow(count - 1);
        let mut exponent = estimate_exponent(self.top(), base);
        let scaled = loop {
            let n = self.scaled_magnitude(base, count as i64 - exponent, count)?;
            if n >= upper {
                exponent += 1;
            } else if n < lower {
                exponent -= 1;
            } else {
                break n;
            }
        };

        let mut digits = radix::format_magnitude(&scaled, base);
        digits.truncate(digits.trim_end_matches('0').len());
        if self.is_negative() {
            digits.insert(0, '-');
        }
        Ok((digits, exponent))
    }

    /// `|self| × base^k` rounded to the nearest integer, ties to even,
    /// for a result of about `digits` digits.
    ///
    /// Off the exact path the rounding is faithful.
    fn scaled_magnitude(&self, base: u32, k: i64, digits: usize) -> NumResult<UBig> {
        let exp = self.exponent();
        if exp.unsigned_abs() as f64 <= EXACT_SCALE_BITS && power_bits(base, k) <= EXACT_SCALE_BITS {
            let (mut num, mut den) = if exp >= 0 {
                (self.significand() << exp.unsigned_abs(), UBig::ONE)
            } else {
                (self.significand().clone(), UBig::ONE << exp.unsigned_abs())
            };
            let power = UBig::from(base).pow(k.unsigned_abs() as usize);
            if k >= 0 {
                num = num * power;
            } else {
                den = den * power;
            }

            let q = &num / &den;
            let twice_rem = (num - &q * &den) << 1usize;
            return Ok(match twice_rem.cmp(&den) {
                Ordering::Greater => q + UBig::ONE,
                Ordering::Equal if q.bit(0) => q + UBig::ONE,
                _ => q,
            });
        }

        let working = power_bits(base, digits as i64).ceil() as usize + 64;
        let y = self.abs().scaled(base, k, working)?;
        let shift = y.exponent();
        Ok(if shift >= 0 {
            y.significand() << shift.unsigned_abs()
        } else {
            bits::round_shift(y.significand(), shift.unsigned_abs(), false)
        })
    }
}

/// Decimal scientific notation, `d.ddd…e±N`, with enough digits to read
/// the value back at its precision.
impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (digits, exponent) = self.to_str_radix(10, 0).map_err(|_| fmt::Error)?;
        let (sign, digits) = match digits.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", digits.as_str()),
        };
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        let exponent = if self.is_zero() { 0 } else { exponent - 1 };
        f.pad(&format!("{sign}{lead}.{rest}e{exponent:+}"))
    }
}

/// Parses decimal text at the default precision.
impl FromStr for BigFloat {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10, default_precision())
    }
}
