//! Bounded bulk sampling.

use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::SampleError;

/// Upper limit for a batch of draws. The lower limit is always zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpperBound<T> {
    /// Whole integer domain; `[0, 1)` for floats.
    Unbounded,
    /// Draws from `[0, bound]`.
    Inclusive(T),
    /// Draws from `[0, bound)`.
    Exclusive(T),
}

/// Element types that can be sampled in bulk.
pub trait Sample: Copy + Default {
    /// Rejects bounds that admit no value.
    ///
    /// # Errors
    ///
    /// Returns a [`SampleError`] describing the bad bound.
    fn check_bound(bound: &UpperBound<Self>) -> Result<(), SampleError>;

    /// Fills `out` with draws under a bound that passed [`Sample::check_bound`].
    fn fill_checked<R: Rng + ?Sized>(rng: &mut R, out: &mut [Self], bound: &UpperBound<Self>);
}

/// Draws every element of `out` from `dist`.
fn fill_from<T, D, R>(rng: &mut R, out: &mut [T], dist: &D)
where
    D: Distribution<T>,
    R: Rng + ?Sized,
{
    for slot in out.iter_mut() {
        *slot = dist.sample(rng);
    }
}

macro_rules! impl_sample_int {
    (@fill) => {
        fn fill_checked<R: Rng + ?Sized>(rng: &mut R, out: &mut [Self], bound: &UpperBound<Self>) {
            match *bound {
                UpperBound::Unbounded => fill_from(rng, out, &rand::distributions::Standard),
                UpperBound::Inclusive(b) => fill_from(rng, out, &Uniform::new_inclusive(0, b)),
                UpperBound::Exclusive(b) => fill_from(rng, out, &Uniform::new(0, b)),
            }
        }
    };
    (signed: $($t:ty),*) => {$(
        impl Sample for $t {
            fn check_bound(bound: &UpperBound<Self>) -> Result<(), SampleError> {
                match *bound {
                    UpperBound::Inclusive(b) | UpperBound::Exclusive(b) if b < 0 => {
                        Err(SampleError::NegativeBound)
                    }
                    UpperBound::Exclusive(0) => Err(SampleError::EmptyRange),
                    _ => Ok(()),
                }
            }

            impl_sample_int!(@fill);
        }
    )*};
    (unsigned: $($t:ty),*) => {$(
        impl Sample for $t {
            fn check_bound(bound: &UpperBound<Self>) -> Result<(), SampleError> {
                match *bound {
                    UpperBound::Exclusive(0) => Err(SampleError::EmptyRange),
                    _ => Ok(()),
                }
            }

            impl_sample_int!(@fill);
        }
    )*};
}

impl_sample_int!(signed: i8, i16, i32, i64);
impl_sample_int!(unsigned: u8, u16, u32, u64);

macro_rules! impl_sample_float {
    ($($t:ty),*) => {$(
        impl Sample for $t {
            fn check_bound(bound: &UpperBound<Self>) -> Result<(), SampleError> {
                match *bound {
                    UpperBound::Unbounded => Ok(()),
                    UpperBound::Inclusive(b) | UpperBound::Exclusive(b) if !b.is_finite() => {
                        Err(SampleError::NonFiniteBound)
                    }
                    UpperBound::Inclusive(b) | UpperBound::Exclusive(b) if b < 0.0 => {
                        Err(SampleError::NegativeBound)
                    }
                    UpperBound::Exclusive(b) if b == 0.0 => Err(SampleError::EmptyRange),
                    _ => Ok(()),
                }
            }

            fn fill_checked<R: Rng + ?Sized>(rng: &mut R, out: &mut [Self], bound: &UpperBound<Self>) {
                match *bound {
                    UpperBound::Unbounded => fill_from(rng, out, &rand::distributions::Standard),
                    // u * b never exceeds b for u in [0, 1], even at MAX.
                    UpperBound::Inclusive(b) => {
                        let unit = Uniform::<$t>::new_inclusive(0.0, 1.0);
                        fill_from(rng, out, &unit.map(move |u| u * b));
                    }
                    UpperBound::Exclusive(b) => fill_from(rng, out, &Uniform::new(0.0, b)),
                }
            }
        }
    )*};
}

impl_sample_float!(f32, f64);

/// Fills `out` with independent draws from `rng`.
///
/// # Errors
///
/// Returns a [`SampleError`] for a negative, non-finite or empty bound;
/// `out` is left untouched in that case.
pub fn fill<T: Sample, R: Rng + ?Sized>(
    rng: &mut R,
    out: &mut [T],
    bound: UpperBound<T>,
) -> Result<(), SampleError> {
    T::check_bound(&bound)?;
    T::fill_checked(rng, out, &bound);
    Ok(())
}

/// A seedable sampler backed by `ChaCha8`.
///
/// # Example
///
/// ```
/// use precis_random::{Sampler, UpperBound};
///
/// let mut sampler = Sampler::from_seed(7);
/// let dice: Vec<u8> = sampler.sample_vec(10, UpperBound::Inclusive(5)).unwrap();
/// assert!(dice.iter().all(|&d| d <= 5));
/// ```
#[derive(Clone, Debug)]
pub struct Sampler {
    rng: ChaCha8Rng,
}

impl Sampler {
    /// Creates a sampler with a reproducible stream.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a sampler seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Fills `out` with independent draws.
    ///
    /// # Errors
    ///
    /// See [`fill`].
    pub fn fill<T: Sample>(&mut self, out: &mut [T], bound: UpperBound<T>) -> Result<(), SampleError> {
        fill(&mut self.rng, out, bound)
    }

    /// Allocates `len` independent draws.
    ///
    /// # Errors
    ///
    /// See [`fill`].
    pub fn sample_vec<T: Sample>(&mut self, len: usize, bound: UpperBound<T>) -> Result<Vec<T>, SampleError> {
        T::check_bound(&bound)?;
        let mut out = vec![T::default(); len];
        T::fill_checked(&mut self.rng, &mut out, &bound);
        Ok(out)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}
