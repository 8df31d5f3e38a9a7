//! Quadrant partitioning and zero-padding.
//!
//! For a square matrix of even dimension `n` with `h = n / 2`:
//!
//! ```text
//!          cols 0..h     cols h..n
//!        +-------------+-------------+
//! rows   |             |             |
//! 0..h   |     q11     |     q12     |
//!        +-------------+-------------+
//! rows   |             |             |
//! h..n   |     q21     |     q22     |
//!        +-------------+-------------+
//! ```
//!
//! Quadrants are independent copies, never views into the parent.

use crate::error::{dimension_mismatch, shape_error, Result};

use super::Matrix;

/// The four quadrants of a square matrix, each an owned `n/2 x n/2` copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadrants {
    /// Top-left.
    pub q11: Matrix,
    /// Top-right.
    pub q12: Matrix,
    /// Bottom-left.
    pub q21: Matrix,
    /// Bottom-right.
    pub q22: Matrix,
}

impl Matrix {
    /// Splits a square matrix of even dimension into its four quadrants.
    ///
    /// `self[(i, j)]` lands in `q11` for `i, j < n/2`, in `q12` at column
    /// `j - n/2` for `j >= n/2`, in `q21` at row `i - n/2` for `i >= n/2`, and
    /// in `q22` with both offsets removed.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`](crate::MatrixError::ShapeError) if the
    /// matrix is not square or its dimension is odd.
    ///
    /// # Example
    ///
    /// ```
    /// use strassen::Matrix;
    ///
    /// let m = Matrix::from_fn(4, 4, |i, j| (i * 4 + j) as f64);
    /// let quadrants = m.split().unwrap();
    /// assert_eq!(quadrants.q12[(0, 0)], 2.0);
    /// assert_eq!(quadrants.q21[(0, 0)], 8.0);
    /// assert_eq!(quadrants.combine().unwrap(), m);
    /// ```
    pub fn split(&self) -> Result<Quadrants> {
        if !self.is_square() {
            return Err(shape_error(
                self.rows(),
                self.cols(),
                "only square matrices can be split into quadrants",
            ));
        }
        if self.rows() % 2 != 0 {
            return Err(shape_error(
                self.rows(),
                self.cols(),
                "quadrant split requires an even dimension",
            ));
        }
        Ok(self.split_unchecked())
    }

    /// Caller guarantees a square matrix of even dimension.
    pub(crate) fn split_unchecked(&self) -> Quadrants {
        let n = self.rows();
        let h = n / 2;

        let mut q11 = Vec::with_capacity(h * h);
        let mut q12 = Vec::with_capacity(h * h);
        let mut q21 = Vec::with_capacity(h * h);
        let mut q22 = Vec::with_capacity(h * h);

        for i in 0..h {
            let (left, right) = self.row(i).split_at(h);
            q11.extend_from_slice(left);
            q12.extend_from_slice(right);
        }
        for i in h..n {
            let (left, right) = self.row(i).split_at(h);
            q21.extend_from_slice(left);
            q22.extend_from_slice(right);
        }

        Quadrants {
            q11: Matrix::from_raw(h, h, q11),
            q12: Matrix::from_raw(h, h, q12),
            q21: Matrix::from_raw(h, h, q21),
            q22: Matrix::from_raw(h, h, q22),
        }
    }

    /// Copies `self` into the top-left corner of a `rows x cols` zero matrix.
    ///
    /// # Panics
    ///
    /// Panics if the target is smaller than `self` in either dimension.
    pub fn padded(&self, rows: usize, cols: usize) -> Matrix {
        assert!(
            rows >= self.rows() && cols >= self.cols(),
            "cannot pad a {}x{} matrix down to {}x{}",
            self.rows(),
            self.cols(),
            rows,
            cols
        );

        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..self.rows() {
            data.extend_from_slice(self.row(i));
            data.resize((i + 1) * cols, 0.0);
        }
        data.resize(rows * cols, 0.0);

        Matrix::from_raw(rows, cols, data)
    }

    /// Copies the top-left `rows x cols` block of `self`.
    ///
    /// # Panics
    ///
    /// Panics if the block is larger than `self` in either dimension.
    pub fn cropped(&self, rows: usize, cols: usize) -> Matrix {
        assert!(
            rows <= self.rows() && cols <= self.cols(),
            "cannot crop a {}x{} matrix up to {}x{}",
            self.rows(),
            self.cols(),
            rows,
            cols
        );

        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            data.extend_from_slice(&self.row(i)[..cols]);
        }

        Matrix::from_raw(rows, cols, data)
    }
}

impl Quadrants {
    /// Reassembles the four quadrants into one `2h x 2h` matrix.
    ///
    /// Exact inverse of [`Matrix::split`].
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
    /// if the quadrants are not all square with the same dimension.
    pub fn combine(&self) -> Result<Matrix> {
        let expected = self.q11.shape();
        if !self.q11.is_square() {
            return Err(dimension_mismatch(
                expected,
                expected,
                "quadrants must be square",
            ));
        }
        for other in [&self.q12, &self.q21, &self.q22] {
            if other.shape() != expected {
                return Err(dimension_mismatch(
                    expected,
                    other.shape(),
                    "all four quadrants must share one dimension",
                ));
            }
        }
        Ok(self.combine_unchecked())
    }

    /// Caller guarantees four square quadrants of the same dimension.
    pub(crate) fn combine_unchecked(&self) -> Matrix {
        let h = self.q11.rows();
        let n = 2 * h;

        let mut data = Vec::with_capacity(n * n);
        for i in 0..h {
            data.extend_from_slice(self.q11.row(i));
            data.extend_from_slice(self.q12.row(i));
        }
        for i in 0..h {
            data.extend_from_slice(self.q21.row(i));
            data.extend_from_slice(self.q22.row(i));
        }

        Matrix::from_raw(n, n, data)
    }
}
