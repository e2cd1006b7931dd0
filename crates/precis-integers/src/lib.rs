//! # precis-integers
//!
//! Exact arbitrary precision arithmetic for Precis.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`) kept in lowest terms
//! - Text conversion in every base from 2 to 62 (`radix`)
//! - The shared error taxonomy (`NumError`, `ErrorKind`)
//! - The destination-writing operation vocabulary (`Arithmetic`)
//!
//! The binary helpers in [`bits`] are shared with the floating point crate:
//! correctly rounded shifts, integer square roots and exact `f64` assembly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bits;
pub mod error;
mod factorial;
pub mod integer;
mod modular;
pub mod radix;
pub mod rational;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use error::{ErrorKind, NumError, NumResult};
pub use integer::Integer;
pub use rational::Rational;
pub use traits::Arithmetic;
