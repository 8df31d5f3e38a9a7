use crate::error::Result;
use crate::matrix::Matrix;
use crate::naive::{multiply_naive_ijk, multiply_naive_ikj};
use crate::strassen::{multiply_strassen, multiply_strassen_parallel};

/// Matrix product in its different flavors.
///
/// ```
/// use strassen::{MatMul, Matrix};
///
/// let a = Matrix::identity(4);
/// let b = Matrix::from_fn(4, 4, |i, j| (i + j) as f64);
///
/// assert_eq!(a.naive_mul(&b).unwrap(), b);
/// assert_eq!(a.strassen_mul(&b).unwrap(), b);
/// ```
pub trait MatMul<Rhs = Self> {
    type Output;

    /// Textbook i-j-k product.
    fn naive_mul(self, rhs: Rhs) -> Self::Output;
    /// Cache-friendly i-k-j product.
    fn cached_mul(self, rhs: Rhs) -> Self::Output;
    /// Sequential Strassen product.
    fn strassen_mul(self, rhs: Rhs) -> Self::Output;
    /// Strassen product with the top levels forked onto the rayon pool.
    fn par_strassen_mul(self, rhs: Rhs) -> Self::Output;
}

impl<'b> MatMul<&'b Matrix> for &Matrix {
    type Output = Result<Matrix>;

    #[inline(always)]
    fn naive_mul(self, rhs: &'b Matrix) -> Self::Output {
        multiply_naive_ijk(self, rhs)
    }

    #[inline(always)]
    fn cached_mul(self, rhs: &'b Matrix) -> Self::Output {
        multiply_naive_ikj(self, rhs)
    }

    #[inline(always)]
    fn strassen_mul(self, rhs: &'b Matrix) -> Self::Output {
        multiply_strassen(self, rhs)
    }

    #[inline(always)]
    fn par_strassen_mul(self, rhs: &'b Matrix) -> Self::Output {
        multiply_strassen_parallel(self, rhs)
    }
}
