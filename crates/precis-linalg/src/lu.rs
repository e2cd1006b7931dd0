//! LU factorization with partial pivoting.
//!
//! Matrices are dense, row-major `f64` buffers. After factoring, the strict
//! lower triangle holds the multipliers of `L` (whose diagonal is implicitly
//! one) and the upper triangle holds `U`, so that `P·A = L·U`.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::LuError;

/// Rows below the pivot needed before elimination runs in parallel.
pub const PARALLEL_THRESHOLD: usize = 64;

/// Swaps rows `i < j` of a row-major buffer.
fn swap_rows(data: &mut [f64], cols: usize, i: usize, j: usize) {
    let (upper, lower) = data.split_at_mut(j * cols);
    upper[i * cols..(i + 1) * cols].swap_with_slice(&mut lower[..cols]);
}

/// Eliminates column `k` of `row` against `pivot_row`, leaving the
/// multiplier in `row[k]`.
fn eliminate(row: &mut [f64], pivot_row: &[f64], k: usize) {
    let factor = row[k] / pivot_row[k];
    row[k] = factor;
    if factor != 0.0 {
        for (a, &p) in row[k + 1..].iter_mut().zip(&pivot_row[k + 1..]) {
            *a -= factor * p;
        }
    }
}

/// Factors a `rows × cols` row-major matrix in place.
///
/// `pivots` must hold `min(rows, cols)` entries; `pivots[k]` receives the
/// row that was swapped with row `k`.
///
/// # Errors
///
/// Returns [`LuError::DimensionMismatch`] if the buffers do not match the
/// dimensions (nothing is modified), and [`LuError::Singular`] with the
/// first zero pivot if `U` is singular. In the singular case the
/// factorization still runs to completion.
pub fn lu_factor_in_place(
    data: &mut [f64],
    rows: usize,
    cols: usize,
    pivots: &mut [usize],
) -> Result<(), LuError> {
    if rows.checked_mul(cols) != Some(data.len()) || pivots.len() != rows.min(cols) {
        return Err(LuError::DimensionMismatch);
    }

    let mut singular = None;
    for k in 0..rows.min(cols) {
        let p = (k + 1..rows).fold(k, |best, i| {
            if data[i * cols + k].abs() > data[best * cols + k].abs() {
                i
            } else {
                best
            }
        });
        pivots[k] = p;
        if data[p * cols + k] == 0.0 {
            tracing::debug!(column = k, "zero pivot in LU factorization");
            singular.get_or_insert(k);
            continue;
        }
        if p != k {
            swap_rows(data, cols, k, p);
        }

        let (head, tail) = data.split_at_mut((k + 1) * cols);
        let pivot_row = &head[k * cols..];
        if rows - k - 1 >= PARALLEL_THRESHOLD {
            tail.par_chunks_mut(cols)
                .for_each(|row| eliminate(row, pivot_row, k));
        } else {
            tail.chunks_mut(cols)
                .for_each(|row| eliminate(row, pivot_row, k));
        }
    }

    match singular {
        Some(index) => Err(LuError::Singular { index }),
        None => Ok(()),
    }
}

/// An owned LU factorization of a square matrix.
#[derive(Clone, Debug)]
pub struct LuDecomposition {
    n: usize,
    lu: Vec<f64>,
    pivots: Vec<usize>,
    singular: Option<usize>,
}

impl LuDecomposition {
    /// Factors an `rows × cols` row-major matrix, which must be square.
    ///
    /// Singular matrices are accepted; [`LuDecomposition::solve`] reports
    /// them and [`LuDecomposition::determinant`] returns zero.
    ///
    /// # Errors
    ///
    /// Returns [`LuError::DimensionMismatch`] for a non-square matrix or a
    /// buffer of the wrong length.
    pub fn new(data: &[f64], rows: usize, cols: usize) -> Result<Self, LuError> {
        if rows != cols {
            return Err(LuError::DimensionMismatch);
        }
        let mut lu = data.to_vec();
        let mut pivots = vec![0; rows];
        let singular = match lu_factor_in_place(&mut lu, rows, cols, &mut pivots) {
            Ok(()) => None,
            Err(LuError::Singular { index }) => Some(index),
            Err(e) => return Err(e),
        };
        Ok(Self {
            n: rows,
            lu,
            pivots,
            singular,
        })
    }

    /// The matrix dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Pivot rows in LAPACK order.
    #[must_use]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Returns true if some pivot was zero.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.singular.is_some()
    }

    fn triangle(&self, keep: impl Fn(Ordering) -> Option<bool>) -> Vec<f64> {
        (0..self.n * self.n)
            .map(|idx| match keep((idx / self.n).cmp(&(idx % self.n))) {
                Some(true) => self.lu[idx],
                Some(false) => 0.0,
                None => 1.0,
            })
            .collect()
    }

    /// The unit lower triangular factor, row-major.
    #[must_use]
    pub fn lower(&self) -> Vec<f64> {
        self.triangle(|o| match o {
            Ordering::Greater => Some(true),
            Ordering::Equal => None,
            Ordering::Less => Some(false),
        })
    }

    /// The upper triangular factor, row-major.
    #[must_use]
    pub fn upper(&self) -> Vec<f64> {
        self.triangle(|o| Some(o != Ordering::Greater))
    }

    /// `perm[i]` is the row of the original matrix that ends up in row `i`.
    #[must_use]
    pub fn permutation(&self) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..self.n).collect();
        for (i, &p) in self.pivots.iter().enumerate() {
            perm.swap(i, p);
        }
        perm
    }

    /// Solves `A·x = b`.
    ///
    /// # Errors
    ///
    /// Returns [`LuError::DimensionMismatch`] if `b` has the wrong length
    /// and [`LuError::Singular`] if `A` is singular.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, LuError> {
        let n = self.n;
        if b.len() != n {
            return Err(LuError::DimensionMismatch);
        }
        if let Some(index) = self.singular {
            return Err(LuError::Singular { index });
        }

        let mut x = b.to_vec();
        for (i, &p) in self.pivots.iter().enumerate() {
            x.swap(i, p);
        }
        // L·y = P·b
        for i in 0..n {
            let s: f64 = (0..i).map(|j| self.lu[i * n + j] * x[j]).sum();
            x[i] -= s;
        }
        // U·x = y
        for i in (0..n).rev() {
            let s: f64 = (i + 1..n).map(|j| self.lu[i * n + j] * x[j]).sum();
            x[i] = (x[i] - s) / self.lu[i * n + i];
        }
        Ok(x)
    }

    /// The determinant of the original matrix.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let n = self.n;
        let swaps = self
            .pivots
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i != p)
            .count();
        let diagonal: f64 = (0..n).map(|i| self.lu[i * n + i]).product();
        if swaps % 2 == 1 {
            -diagonal
        } else {
            diagonal
        }
    }
}
