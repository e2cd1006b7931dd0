//! # precis-float
//!
//! Binary floating point numbers with a precision chosen per value.
//!
//! - [`BigFloat`]: `±significand × 2^exponent`, rounded to nearest with
//!   ties to even after every operation
//! - [`Operand`]: lets each operation take a float or a native `u64` in
//!   either position
//! - [`FloatContext`] and the process-wide default precision
//!
//! Results always take the precision of the destination they are written
//! into. The operators on references use the wider operand precision.
//!
//! ```
//! use precis_float::{BigFloat, FloatContext};
//!
//! let ctx = FloatContext::new(128).unwrap();
//! let mut root = ctx.zero();
//! root.set_sqrt(2u64).unwrap();
//! assert!(root < 1.4142135623730951);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod float;
mod operand;
pub mod precision;
mod text;

#[cfg(test)]
mod proptests;

pub use float::BigFloat;
pub use operand::Operand;
pub use precision::{default_precision, set_default_precision, FloatContext, DEFAULT_PRECISION};
