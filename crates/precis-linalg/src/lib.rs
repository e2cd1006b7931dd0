//! # precis-linalg
//!
//! Dense LU factorization for row-major `f64` matrices.
//!
//! - [`lu_factor_in_place`]: partial pivoting, LAPACK-style pivot indices
//!   and status codes
//! - [`LuDecomposition`]: an owned factorization of a square matrix with
//!   solving and determinants
//!
//! Row elimination below each pivot runs on rayon once enough rows remain.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod lu;

pub use error::{status, LuError};
pub use lu::{lu_factor_in_place, LuDecomposition, PARALLEL_THRESHOLD};
