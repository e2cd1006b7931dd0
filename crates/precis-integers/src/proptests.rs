//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    // Integers well beyond 64 bits
    fn big_int() -> impl Strategy<Value = Integer> {
        (any::<i64>(), any::<u64>(), 0u32..4).prop_map(|(hi, lo, k)| {
            Integer::new(hi) * Integer::from(lo).pow(k) + Integer::from(lo)
        })
    }

    fn rational() -> impl Strategy<Value = Rational> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d).unwrap())
    }

    proptest! {
        // Integer ring axioms

        #[test]
        fn integer_add_commutative(a in big_int(), b in big_int()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn integer_add_associative(a in big_int(), b in big_int(), c in big_int()) {
            prop_assert_eq!(
                (a.clone() + b.clone()) + c.clone(),
                a + (b + c)
            );
        }

        #[test]
        fn integer_mul_commutative(a in big_int(), b in big_int()) {
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn integer_distributive(a in big_int(), b in big_int(), c in big_int()) {
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn integer_additive_inverse(a in big_int()) {
            let neg_a = -a.clone();
            prop_assert!((a + neg_a).is_zero());
        }

        // Truncating division: a = q*b + r, |r| < |b|, r has the sign of a

        #[test]
        fn integer_division_identity(a in big_int(), b in non_zero_int()) {
            let b = Integer::new(b);
            let (q, r) = a.div_rem(&b).unwrap();
            prop_assert_eq!(&q * &b + &r, a.clone());
            prop_assert!(r.abs() < b.abs());
            prop_assert!(r.is_zero() || r.signum() == a.signum());
        }

        // GCD properties

        #[test]
        fn gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);

            prop_assert!((a % g.clone()).is_zero());
            prop_assert!((b % g).is_zero());
        }

        #[test]
        fn extended_gcd_bezout(a in big_int(), b in big_int()) {
            let (g, x, y) = a.extended_gcd(&b);
            prop_assert_eq!(&a * &x + &b * &y, g.clone());
            prop_assert_eq!(g, a.gcd(&b));
        }

        // Text round trips

        #[test]
        fn integer_radix_round_trip(a in big_int(), base in 2u32..=62) {
            let text = a.to_str_radix(base).unwrap();
            prop_assert_eq!(Integer::from_str_radix(&text, base).unwrap(), a);
        }

        #[test]
        fn rational_radix_round_trip(r in rational(), base in 2u32..=62) {
            let text = r.to_str_radix(base).unwrap();
            prop_assert_eq!(Rational::from_str_radix(&text, base).unwrap(), r);
        }

        // Rational field axioms

        #[test]
        fn rational_is_canonical(n in small_int(), d in non_zero_int()) {
            let r = Rational::from_i64(n, d).unwrap();
            prop_assert!(r.is_canonical());
            prop_assert!(r.denominator().signum() > 0);
            prop_assert!(r.numerator().gcd(r.denominator()).is_one());
        }

        #[test]
        fn canonicalize_is_idempotent(n in small_int(), d in non_zero_int()) {
            let mut r = Rational::from_parts_unreduced(Integer::new(n), Integer::new(d)).unwrap();
            r.canonicalize();
            let once = r.clone().into_parts();
            r.canonicalize();
            prop_assert_eq!(r.into_parts(), once);
        }

        #[test]
        fn rational_add_commutative(a in rational(), b in rational()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn rational_distributive(a in rational(), b in rational(), c in rational()) {
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn rational_multiplicative_inverse(n in non_zero_int(), d in non_zero_int()) {
            let a = Rational::from_i64(n, d).unwrap();
            let inv = a.recip().unwrap();
            prop_assert!((a * inv).is_one());
        }

        #[test]
        fn rational_order_matches_f64(a in rational(), b in rational()) {
            if a.to_f64() < b.to_f64() {
                prop_assert!(a < b);
            }
        }

        #[test]
        fn rational_floor_ceil_bracket(r in rational()) {
            let floor = Rational::from(r.floor());
            let ceil = Rational::from(r.ceil());
            prop_assert!(floor <= r && r <= ceil);
            prop_assert!(&ceil - &floor <= Rational::one());
        }
    }
}
