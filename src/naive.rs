//! Triple-loop matrix multiplication.
//!
//! All variants compute `C[i][j] = Σ_k A[i][k] * B[k][j]` for `A` (m × p) and
//! `B` (p × n) and differ only in loop order:
//!
//! - `i-j-k`: the textbook order. The innermost loop walks B down a column,
//!   touching a new cache line on every step.
//! - `i-k-j`: the j and k loops are swapped so the innermost loop streams one
//!   row of B into one row of C, both with stride 1.
//! - blocked: `i-k-j` over `block x block` tiles so a working set of A, B and C
//!   stays resident in cache.
//!
//! For each output element all three accumulate `k` in ascending order, so they
//! agree to within rounding; callers should still compare with a tolerance.

use std::cmp::min;

use crate::error::{dimension_mismatch, validation_error, Result};
use crate::matrix::Matrix;

/// Ground-truth product used for validation. Same as [`multiply_naive_ijk`].
///
/// # Errors
///
/// Returns [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
/// if `a.cols() != b.rows()`. Nothing is allocated in that case.
///
/// # Example
///
/// ```
/// use strassen::{multiply_naive, Matrix};
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
///
/// let c = multiply_naive(&a, &b).unwrap();
/// assert_eq!(c.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
/// ```
pub fn multiply_naive(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    multiply_naive_ijk(a, b)
}

/// Naive multiplication using i-j-k loop order.
///
/// # Errors
///
/// Returns [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
/// if `a.cols() != b.rows()`.
pub fn multiply_naive_ijk(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    check_inner_dimensions(a, b)?;
    Ok(ijk_product(a, b))
}

/// Cache-friendly multiplication using i-k-j loop order.
///
/// # Errors
///
/// Returns [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
/// if `a.cols() != b.rows()`.
pub fn multiply_naive_ikj(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    check_inner_dimensions(a, b)?;
    Ok(ikj_product(a, b))
}

/// Tiled i-k-j multiplication with square `block x block` tiles.
///
/// # Errors
///
/// Returns [`MatrixError::ValidationError`](crate::MatrixError::ValidationError)
/// if `block == 0`, and
/// [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
/// if `a.cols() != b.rows()`.
pub fn multiply_blocked(a: &Matrix, b: &Matrix, block: usize) -> Result<Matrix> {
    if block == 0 {
        return Err(validation_error("block size must be at least 1"));
    }
    check_inner_dimensions(a, b)?;

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = vec![0.0; m * n];
    matmul_blocked(a.as_slice(), b.as_slice(), &mut c, m, n, k, block);
    Ok(Matrix::from_raw(m, n, c))
}

fn check_inner_dimensions(a: &Matrix, b: &Matrix) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(dimension_mismatch(
            a.shape(),
            b.shape(),
            "columns of the left operand must equal rows of the right operand",
        ));
    }
    Ok(())
}

/// Unchecked i-j-k product. Caller guarantees `a.cols() == b.rows()`.
pub(crate) fn ijk_product(a: &Matrix, b: &Matrix) -> Matrix {
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = vec![0.0; m * n];
    matmul_ijk(a.as_slice(), b.as_slice(), &mut c, m, n, k);
    Matrix::from_raw(m, n, c)
}

/// Unchecked i-k-j product. Caller guarantees `a.cols() == b.rows()`.
pub(crate) fn ikj_product(a: &Matrix, b: &Matrix) -> Matrix {
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut c = vec![0.0; m * n];
    matmul_ikj(a.as_slice(), b.as_slice(), &mut c, m, n, k);
    Matrix::from_raw(m, n, c)
}

/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, overwritten
fn matmul_ijk(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            for p in 0..k {
                sum += a[i * k + p] * b[p * n + j];
            }
            c[i * n + j] = sum;
        }
    }
}

/// Same layout as [`matmul_ijk`]; `c` must start zeroed.
fn matmul_ikj(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (c_ij, b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}

/// Same layout as [`matmul_ijk`]; `c` must start zeroed.
#[allow(clippy::too_many_arguments)]
fn matmul_blocked(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize, block: usize) {
    for ii in (0..m).step_by(block) {
        let i_end = min(ii + block, m);
        for kk in (0..k).step_by(block) {
            let k_end = min(kk + block, k);
            for jj in (0..n).step_by(block) {
                let j_end = min(jj + block, n);
                for i in ii..i_end {
                    for p in kk..k_end {
                        let a_ip = a[i * k + p];
                        for j in jj..j_end {
                            c[i * n + j] += a_ip * b[p * n + j];
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixError;

    #[test]
    fn test_rectangular_product() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]).unwrap();

        let expected = vec![vec![58.0, 64.0], vec![139.0, 154.0]];
        assert_eq!(multiply_naive_ijk(&a, &b).unwrap().to_rows(), expected);
        assert_eq!(multiply_naive_ikj(&a, &b).unwrap().to_rows(), expected);
        assert_eq!(multiply_blocked(&a, &b, 2).unwrap().to_rows(), expected);
    }

    #[test]
    fn test_inner_dimension_mismatch() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();

        for result in [
            multiply_naive(&a, &b),
            multiply_naive_ikj(&a, &b),
            multiply_blocked(&a, &b, 4),
        ] {
            assert!(matches!(
                result,
                Err(MatrixError::DimensionMismatch {
                    left: (1, 2),
                    right: (1, 2),
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_zero_block_is_rejected() {
        let a = Matrix::identity(2);
        assert!(matches!(
            multiply_blocked(&a, &a, 0),
            Err(MatrixError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_empty_inner_dimension_gives_zeros() {
        let a = Matrix::zeros(3, 0);
        let b = Matrix::zeros(0, 2);
        let c = multiply_naive_ikj(&a, &b).unwrap();
        assert_eq!(c, Matrix::zeros(3, 2));
    }
}
