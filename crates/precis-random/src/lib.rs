//! # precis-random
//!
//! Bulk pseudo-random sampling of native numbers.
//!
//! Fills caller buffers with independent draws of any of the eight integer
//! widths (`i8` to `u64`) or the two float widths, optionally bounded above:
//!
//! - [`UpperBound::Unbounded`]: the whole integer domain, or `[0, 1)` for
//!   floats
//! - [`UpperBound::Inclusive`]: `[0, bound]`
//! - [`UpperBound::Exclusive`]: `[0, bound)`
//!
//! [`Sampler`] owns a seedable `ChaCha8` generator; [`fill`] works with any
//! [`rand::Rng`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod sample;

pub use error::SampleError;
pub use sample::{fill, Sample, Sampler, UpperBound};
