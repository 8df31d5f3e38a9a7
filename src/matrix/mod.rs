//! Dense row-major matrix storage.
//!
//! [`Matrix`] owns one contiguous `Vec<f64>` of `rows * cols` elements laid out
//! row by row. A matrix is filled once while it is being built and is read-only
//! afterwards: every operation in this crate takes its operands by reference and
//! returns a freshly allocated result.
//!
//! Submodules:
//! - `ops`: elementwise addition and subtraction
//! - `quadrant`: quadrant split/combine and zero-padding used by Strassen

mod ops;
mod quadrant;

pub use quadrant::Quadrants;

use std::ops::Index;

use ndarray::Array2;
use rayon::{iter::IndexedParallelIterator, iter::ParallelIterator, slice::ParallelSliceMut};

use crate::error::{dimension_mismatch, Result};

/// A dense, rectangular matrix of `f64` values stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `rows x cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Matrix::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Builds a matrix by evaluating `f(i, j)` for every element, row by row.
    ///
    /// # Example
    ///
    /// ```
    /// use strassen::Matrix;
    ///
    /// let m = Matrix::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
    /// assert_eq!(m[(1, 2)], 5.0);
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Matrix { rows, cols, data }
    }

    /// Same as [`Matrix::from_fn`] but fills rows in parallel on the rayon pool.
    ///
    /// `f` is called exactly once per element; the call order across rows is
    /// unspecified.
    pub fn par_from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Sync + Send,
    {
        let mut data = vec![0.0; rows * cols];

        // par_chunks_mut panics on a zero chunk size
        if cols > 0 {
            data.par_chunks_mut(cols)
                .enumerate()
                .for_each(|(i, row)| {
                    for (j, value) in row.iter_mut().enumerate() {
                        *value = f(i, j);
                    }
                });
        }

        Matrix { rows, cols, data }
    }

    /// Wraps a row-major buffer of `rows * cols` elements.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
    /// if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(dimension_mismatch(
                (rows, cols),
                (1, data.len()),
                format!(
                    "buffer of {} elements cannot hold a {}x{} matrix",
                    data.len(),
                    rows,
                    cols
                ),
            ));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix from a sequence of rows.
    ///
    /// An empty outer vector yields a `0 x 0` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
    /// if the rows do not all have the same length.
    ///
    /// # Example
    ///
    /// ```
    /// use strassen::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    ///
    /// assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(dimension_mismatch(
                    (1, n_cols),
                    (1, row.len()),
                    format!("row {} has a different length than row 0", i),
                ));
            }
            data.extend(row);
        }

        Ok(Matrix {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Wraps a buffer whose length the caller guarantees.
    #[inline(always)]
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Matrix { rows, cols, data }
    }

    /// Number of rows.
    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Element at `(i, j)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Row `i` as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "row {} out of bounds ({} rows)", i, self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// The whole row-major buffer.
    #[inline(always)]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix and returns its row-major buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copies the matrix out as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// True for an `n x n` matrix with `n >= 1` and `n & (n - 1) == 0`.
    pub fn is_power_of_two_square(&self) -> bool {
        self.is_square() && self.rows.is_power_of_two()
    }

    /// Converts into an owned ndarray `Array2`.
    pub fn to_array2(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.rows, self.cols), |(i, j)| {
            self.data[i * self.cols + j]
        })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl From<&Array2<f64>> for Matrix {
    fn from(array: &Array2<f64>) -> Self {
        Matrix::from_fn(array.nrows(), array.ncols(), |i, j| array[[i, j]])
    }
}
