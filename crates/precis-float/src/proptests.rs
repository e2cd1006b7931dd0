//! Property-based tests for float rounding and text conversion.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{BigFloat, FloatContext};
    use precis_integers::Rational;

    // Doubles well inside the normal range, so IEEE results stay normal.
    fn moderate() -> impl Strategy<Value = f64> {
        prop_oneof![-1e100f64..1e100f64, -1e-50f64..1e-50f64, -4.0f64..4.0f64]
    }

    fn non_zero() -> impl Strategy<Value = f64> {
        moderate().prop_filter("divisor must be nonzero", |x| *x != 0.0)
    }

    fn ctx(precision: usize) -> FloatContext {
        FloatContext::new(precision).unwrap()
    }

    fn double(x: f64) -> BigFloat {
        ctx(53).from_f64(x).unwrap()
    }

    proptest! {
        // At 53 bits every operation must agree with IEEE double arithmetic.

        #[test]
        fn sum_matches_ieee(a in moderate(), b in moderate()) {
            let mut r = ctx(53).zero();
            r.set_sum(&double(a), &double(b));
            prop_assert_eq!(r.to_f64(), a + b);
            r.set_difference(&double(a), &double(b));
            prop_assert_eq!(r.to_f64(), a - b);
        }

        #[test]
        fn product_matches_ieee(a in -1e100f64..1e100f64, b in -1e100f64..1e100f64) {
            let mut r = ctx(53).zero();
            r.set_product(&double(a), &double(b));
            prop_assert_eq!(r.to_f64(), a * b);
        }

        #[test]
        fn quotient_matches_ieee(a in -1e100f64..1e100f64, b in non_zero()) {
            let mut r = ctx(53).zero();
            r.set_quotient(&double(a), &double(b)).unwrap();
            prop_assert_eq!(r.to_f64(), a / b);
        }

        #[test]
        fn sqrt_matches_ieee(a in 0f64..1e300f64) {
            let mut r = ctx(53).zero();
            r.set_sqrt(&double(a)).unwrap();
            prop_assert_eq!(r.to_f64(), a.sqrt());
        }

        // Wide enough destinations make sums and products exact.

        #[test]
        fn wide_product_is_exact(a in moderate(), b in moderate()) {
            let mut r = ctx(106).zero();
            r.set_product(&double(a), &double(b));
            let expected = Rational::from_f64(a).unwrap() * Rational::from_f64(b).unwrap();
            prop_assert_eq!(r.to_rational(), expected);
        }

        #[test]
        fn sum_commutes(a in moderate(), b in moderate(), precision in 1usize..120) {
            let c = ctx(precision);
            let (x, y) = (double(a), double(b));
            let mut lhs = c.zero();
            let mut rhs = c.zero();
            lhs.set_sum(&x, &y);
            rhs.set_sum(&y, &x);
            prop_assert_eq!(lhs, rhs);
        }

        // Precision changes

        #[test]
        fn set_precision_is_idempotent(a in moderate(), precision in 1usize..200) {
            let x = ctx(precision).from_f64(a).unwrap();
            let mut y = x.clone();
            y.set_precision(precision).unwrap();
            prop_assert_eq!(y.precision(), precision);
            prop_assert_eq!(y, x);
        }

        #[test]
        fn narrowing_cannot_be_undone(a in moderate(), wide in 20usize..120, narrow in 1usize..20) {
            let x = ctx(wide).from_f64(a).unwrap();
            let mut once = x.clone();
            once.set_precision(narrow).unwrap();
            let mut restored = once.clone();
            restored.set_precision(wide).unwrap();
            prop_assert_eq!(&restored, &once);
            prop_assert_eq!(restored.precision(), wide);
        }

        // Text round trip at the value's own precision

        #[test]
        fn text_round_trip(a in moderate(), base in 2u32..=62, precision in 1usize..160) {
            let x = ctx(precision).from_f64(a).unwrap();
            let (digits, exponent) = x.to_str_radix(base, 0).unwrap();
            let (sign, digits) = match digits.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", digits.as_str()),
            };
            let text = format!("{sign}0.{digits}@{exponent}");
            let back = BigFloat::from_str_radix(&text, base, precision).unwrap();
            prop_assert_eq!(back, x);
        }

        #[test]
        fn display_round_trip(a in moderate(), precision in 1usize..160) {
            let x = ctx(precision).from_f64(a).unwrap();
            let back = BigFloat::from_str_radix(&x.to_string(), 10, precision).unwrap();
            prop_assert_eq!(back, x);
        }

        #[test]
        fn digits_fit_the_request(a in moderate(), base in 2u32..=62, max in 1usize..30) {
            let x = ctx(64).from_f64(a).unwrap();
            let (digits, _) = x.to_str_radix(base, max).unwrap();
            let digits = digits.trim_start_matches('-');
            prop_assert!(digits.len() <= max);
            prop_assert!(!digits.ends_with('0') || digits == "0");
        }
    }
}
