//! # Precis
//!
//! Arbitrary precision arithmetic in three cooperating number types.
//!
//! ## Features
//!
//! - **Integers**: unbounded signed integers with factorials, modular
//!   exponentiation and exact digit counts
//! - **Rationals**: exact fractions, always in lowest terms
//! - **Floats**: binary floating point with a precision per value and a
//!   process-wide default
//! - **Text**: every type reads and writes bases 2 through 62
//! - **Collaborators**: bulk random sampling and dense LU factorization
//!
//! ## Quick Start
//!
//! ```rust
//! use precis::prelude::*;
//!
//! let a: Integer = "99999999999999999999".parse().unwrap();
//! assert_eq!((a + Integer::new(1)).to_string(), "100000000000000000000");
//!
//! let half = Rational::from_i64(4, 8).unwrap();
//! assert_eq!(half.to_string(), "1/2");
//!
//! let ctx = FloatContext::new(128).unwrap();
//! let mut root = ctx.zero();
//! root.set_sqrt(2u64).unwrap();
//! assert_eq!(root.to_f64(), std::f64::consts::SQRT_2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use precis_float as float;
pub use precis_integers as integers;
pub use precis_linalg as linalg;
pub use precis_random as random;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use precis_float::{
        default_precision, set_default_precision, BigFloat, FloatContext, Operand,
    };
    pub use precis_integers::{Arithmetic, ErrorKind, Integer, NumError, NumResult, Rational};
    pub use precis_linalg::{lu_factor_in_place, LuDecomposition, LuError};
    pub use precis_random::{SampleError, Sampler, UpperBound};
}
