//! Binary-level helpers shared by the integer, rational and float types.
//!
//! Everything here works on unsigned magnitudes; callers track the sign.
//! Rounding is always to nearest with ties to even.

use dashu::base::BitTest;
use dashu::integer::UBig;

/// Returns the low 64 bits of `n`.
#[must_use]
pub fn low_u64(n: &UBig) -> u64 {
    u64::try_from(n & UBig::from(u64::MAX)).unwrap_or_default()
}

/// Returns the number of trailing zero bits of `n` (zero for `n == 0`).
#[must_use]
pub fn trailing_zeros(n: &UBig) -> usize {
    n.trailing_zeros().unwrap_or(0)
}

/// Returns true if any of the lowest `k` bits of `n` is set.
#[must_use]
pub fn has_low_bits(n: &UBig, k: usize) -> bool {
    n.trailing_zeros().is_some_and(|zeros| zeros < k)
}

/// Computes `n / 2^shift` rounded to nearest, ties to even.
///
/// `sticky` marks a nonzero fraction strictly below the lowest bit of `n`
/// that `n` itself does not carry.
#[must_use]
pub fn round_shift(n: &UBig, shift: usize, sticky: bool) -> UBig {
    if shift == 0 {
        return n.clone();
    }
    let quotient = n >> shift;
    if !n.bit(shift - 1) {
        return quotient;
    }
    let tie = !sticky && !has_low_bits(n, shift - 1);
    if tie && !quotient.bit(0) {
        quotient
    } else {
        quotient + UBig::ONE
    }
}

/// Divides `num` by `den` keeping at least `min_bits` significant bits.
///
/// Returns `(q, exp, sticky)` where `num / den = (q + f) * 2^exp` for some
/// `0 <= f < 1`, and `sticky` is true exactly when `f != 0`.
///
/// `den` must be nonzero.
#[must_use]
pub fn ratio_bits(num: &UBig, den: &UBig, min_bits: usize) -> (UBig, isize, bool) {
    let num_bits = num.bit_len() as isize;
    let den_bits = den.bit_len() as isize;
    let shift = (min_bits as isize + den_bits - num_bits).max(0);
    let shifted = num << shift as usize;
    let quotient = &shifted / den;
    let sticky = &quotient * den != shifted;
    (quotient, -shift, sticky)
}

/// Builds the `f64` nearest to `±(mag + f) * 2^exp`.
///
/// `sticky` has the same meaning as in [`round_shift`]. Values beyond the
/// finite range become infinities and tiny values flush through the
/// subnormal range down to zero.
#[must_use]
pub fn compose_f64(negative: bool, mag: &UBig, exp: isize, sticky: bool) -> f64 {
    let signed = |v: f64| if negative { -v } else { v };
    if mag.is_zero() {
        return 0.0;
    }
    let top = exp + mag.bit_len() as isize - 1;
    if top > 1023 {
        return signed(f64::INFINITY);
    }
    if top < -1075 {
        return signed(0.0);
    }

    let mut quantum = (top - 52).max(-1074);
    let mut m = if exp >= quantum {
        mag << (exp - quantum) as usize
    } else {
        round_shift(mag, (quantum - exp) as usize, sticky)
    };
    if m.bit_len() > 53 {
        m = m >> 1usize;
        quantum += 1;
    }

    let m = low_u64(&m);
    let bits = if m >= 1 << 52 {
        let biased = quantum + 52 + 1023;
        if biased >= 2047 {
            return signed(f64::INFINITY);
        }
        ((biased as u64) << 52) | (m & ((1 << 52) - 1))
    } else {
        m
    };
    signed(f64::from_bits(bits))
}

/// Splits a finite `f64` into `(negative, mantissa, exp)` with
/// `|x| = mantissa * 2^exp` exactly.
///
/// Returns `None` for NaN and infinities.
#[must_use]
pub fn decompose_f64(x: f64) -> Option<(bool, u64, isize)> {
    if !x.is_finite() {
        return None;
    }
    let bits = x.to_bits();
    let negative = bits >> 63 == 1;
    let biased = ((bits >> 52) & 0x7ff) as isize;
    let fraction = bits & ((1 << 52) - 1);
    if biased == 0 {
        Some((negative, fraction, -1074))
    } else {
        Some((negative, fraction | (1 << 52), biased - 1075))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ubig(v: u64) -> UBig {
        UBig::from(v)
    }

    #[test]
    fn test_low_u64() {
        assert_eq!(low_u64(&ubig(0)), 0);
        assert_eq!(low_u64(&ubig(u64::MAX)), u64::MAX);
        let big = (ubig(1) << 100) + ubig(0xdead_beef);
        assert_eq!(low_u64(&big), 0xdead_beef);
    }

    #[test]
    fn test_round_shift_ties_to_even() {
        // 0b1010 / 4 = 2.5 -> 2, 0b1110 / 4 = 3.5 -> 4
        assert_eq!(round_shift(&ubig(0b1010), 2, false), ubig(2));
        assert_eq!(round_shift(&ubig(0b1110), 2, false), ubig(4));
        // A sticky remainder breaks the tie upwards.
        assert_eq!(round_shift(&ubig(0b1010), 2, true), ubig(3));
        assert_eq!(round_shift(&ubig(0b1001), 2, false), ubig(2));
        assert_eq!(round_shift(&ubig(0b1011), 2, false), ubig(3));
    }

    #[test]
    fn test_trailing_zeros() {
        assert_eq!(trailing_zeros(&ubig(0)), 0);
        assert_eq!(trailing_zeros(&ubig(0b1000)), 3);
        assert_eq!(trailing_zeros(&(ubig(5) << 200)), 200);
        assert!(has_low_bits(&ubig(0b1010), 2));
        assert!(!has_low_bits(&ubig(0b1000), 3));
        assert!(!has_low_bits(&ubig(0), 8));
    }

    #[test]
    fn test_compose_matches_native() {
        for &x in &[1.0, 0.1, 1e300, 5e-324, 2.2250738585072014e-308, 123_456.789, f64::MAX] {
            let (neg, mantissa, exp) = decompose_f64(x).unwrap();
            assert_eq!(compose_f64(neg, &ubig(mantissa), exp, false), x);
        }
    }

    #[test]
    fn test_compose_rounding() {
        // 2^53 + 1 is a tie between 2^53 and 2^53 + 2; ties go to even.
        let v = (ubig(1) << 53) + ubig(1);
        assert_eq!(compose_f64(false, &v, 0, false), 9_007_199_254_740_992.0);
        assert_eq!(compose_f64(false, &v, 0, true), 9_007_199_254_740_994.0);
        assert_eq!(compose_f64(true, &ubig(1), 2000, false), f64::NEG_INFINITY);
        assert_eq!(compose_f64(false, &ubig(1), -2000, false), 0.0);
    }

    #[test]
    fn test_ratio_bits() {
        let (q, exp, sticky) = ratio_bits(&ubig(1), &ubig(3), 64);
        assert!(q.bit_len() >= 64);
        assert!(sticky);
        let approx = compose_f64(false, &q, exp, sticky);
        assert_eq!(approx, 1.0 / 3.0);

        let (q, exp, sticky) = ratio_bits(&ubig(12), &ubig(4), 4);
        assert!(!sticky);
        assert_eq!(compose_f64(false, &q, exp, sticky), 3.0);
    }
}
