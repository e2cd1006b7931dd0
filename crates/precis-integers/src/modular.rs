//! Modular arithmetic on arbitrary precision integers.
//!
//! Residues are always reported in `[0, |m|)`, whatever the signs of the
//! operands.

use dashu::base::ExtendedGcd;
use dashu::integer::fast_div::ConstDivisor;
use dashu::integer::UBig;
use num_traits::{One, Zero};

use crate::error::{NumError, NumResult};
use crate::Integer;

impl Integer {
    /// Extended Euclidean algorithm.
    ///
    /// Returns `(g, x, y)` with `g = self*x + other*y` and `g >= 0`.
    /// `gcd(0, 0)` is `(0, 1, 0)`.
    #[must_use]
    pub fn extended_gcd(&self, other: &Self) -> (Self, Self, Self) {
        if self.is_zero() && other.is_zero() {
            return (Self::zero(), Self::one(), Self::zero());
        }
        let (g, x, y) = self.as_inner().gcd_ext(other.as_inner());
        (Self::from(g), Self::from(x), Self::from(y))
    }

    /// Least non-negative residue of `self` modulo `modulus`.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroModulus`] if `modulus` is zero.
    pub fn modulo(&self, modulus: &Self) -> NumResult<Self> {
        if modulus.is_zero() {
            return Err(NumError::ZeroModulus);
        }
        let m = modulus.abs();
        let r = self % &m;
        Ok(if r.is_negative() { r + m } else { r })
    }

    /// Computes the inverse of `self` modulo `modulus`.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroModulus`] for a zero modulus and
    /// [`NumError::NotInvertible`] when `gcd(self, modulus) != 1`.
    pub fn mod_inverse(&self, modulus: &Self) -> NumResult<Self> {
        if modulus.is_zero() {
            return Err(NumError::ZeroModulus);
        }
        let m = modulus.abs();
        let (g, x, _) = self.extended_gcd(&m);
        if !g.is_one() {
            return Err(NumError::NotInvertible);
        }
        x.modulo(&m)
    }

    /// Computes `self^exponent mod modulus`.
    ///
    /// The result lies in `[0, |modulus|)`. A negative exponent raises the
    /// modular inverse instead.
    ///
    /// # Errors
    ///
    /// Returns [`NumError::ZeroModulus`] for a zero modulus, and
    /// [`NumError::NotInvertible`] for a negative exponent when `self` has
    /// no inverse.
    pub fn pow_mod(&self, exponent: &Self, modulus: &Self) -> NumResult<Self> {
        let base = if exponent.is_negative() {
            self.mod_inverse(modulus)?
        } else {
            self.modulo(modulus)?
        };
        let m = modulus.magnitude();
        if m == UBig::ONE {
            return Ok(Self::zero());
        }
        let ring = ConstDivisor::new(m);
        let power = ring.reduce(base.magnitude()).pow(&exponent.magnitude());
        Ok(Self::from(power.residue()))
    }
}
