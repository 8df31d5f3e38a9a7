//! # Strassen Matrix Multiplication
//!
//! Divide-and-conquer product of two square matrices whose dimension is a
//! power of two. Each level splits both operands into quadrants and replaces the
//! eight quadrant products of the textbook block formula with seven:
//!
//! ```text
//! m1 = (a11 + a22)(b11 + b22)      c11 = m1 + m4 - m5 + m7
//! m2 = (a21 + a22) b11             c12 = m3 + m5
//! m3 = a11 (b12 - b22)             c21 = m2 + m4
//! m4 = a22 (b21 - b11)             c22 = m1 + m3 - m2 + m6
//! m5 = (a11 + a12) b22
//! m6 = (a21 - a11)(b11 + b12)
//! m7 = (a12 - a22)(b21 + b22)
//! ```
//!
//! giving `O(n^log2(7)) ≈ O(n^2.807)` multiplications at the price of eighteen
//! `O(n²)` additions per level. Below [`StrassenConfig::cutoff`] the extra
//! additions cost more than they save, so the recursion hands off to the
//! cache-friendly i-k-j naive kernel.
//!
//! Shapes are validated once at the public entry points; the recursion itself
//! trusts that every level sees two `n x n` operands with `n` a power of two,
//! which makes `n` even whenever `n > cutoff`.
//!
//! The seven products at one level are independent. With
//! [`StrassenConfig::parallel_depth`] > 0 the top levels fork them onto the
//! rayon pool with `rayon::join` and join all seven before combining.

use crate::error::{dimension_mismatch, shape_error, validation_error, Result};
use crate::matrix::{Matrix, Quadrants};
use crate::naive::ikj_product;
use crate::{CUTOFF, PARALLEL_DEPTH};

/// Tuning parameters for the Strassen recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrassenConfig {
    /// Operands of dimension `<= cutoff` are multiplied with the naive kernel.
    /// Must be at least 1.
    pub cutoff: usize,
    /// Number of top recursion levels whose seven products run in parallel.
    /// `0` keeps the whole computation on the calling thread.
    pub parallel_depth: usize,
}

impl Default for StrassenConfig {
    fn default() -> Self {
        StrassenConfig {
            cutoff: CUTOFF,
            parallel_depth: 0,
        }
    }
}

impl StrassenConfig {
    /// Sequential configuration with the given cutoff.
    pub fn with_cutoff(cutoff: usize) -> Self {
        StrassenConfig {
            cutoff,
            ..StrassenConfig::default()
        }
    }

    /// Returns a copy that parallelizes the top `depth` recursion levels.
    pub fn parallel(self, depth: usize) -> Self {
        StrassenConfig {
            parallel_depth: depth,
            ..self
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cutoff == 0 {
            return Err(validation_error("strassen cutoff must be at least 1"));
        }
        Ok(())
    }
}

/// Multiplies two `n x n` matrices, `n` a power of two, with the default
/// cutoff ([`CUTOFF`]) on the calling thread.
///
/// # Errors
///
/// Returns [`MatrixError::ShapeError`](crate::MatrixError::ShapeError) if
/// either operand is not square, the dimensions differ, or `n` is not a power
/// of two (including `n == 0`). Inputs are never padded; see
/// [`multiply_strassen_padded`] for that.
///
/// # Example
///
/// ```
/// use strassen::{multiply_naive, multiply_strassen, utils, EPSILON};
///
/// let a = utils::generate_random_seeded(128, 128, 7);
/// let b = utils::generate_random_seeded(128, 128, 8);
///
/// let fast = multiply_strassen(&a, &b).unwrap();
/// let reference = multiply_naive(&a, &b).unwrap();
/// assert!(utils::approx_equal(&fast, &reference, EPSILON));
/// ```
pub fn multiply_strassen(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    multiply_strassen_with(a, b, &StrassenConfig::default())
}

/// Same as [`multiply_strassen`] but forks the seven sub-products of the top
/// [`PARALLEL_DEPTH`] levels onto the rayon pool.
///
/// Produces exactly the same result as the sequential version.
pub fn multiply_strassen_parallel(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    multiply_strassen_with(a, b, &StrassenConfig::default().parallel(PARALLEL_DEPTH))
}

/// Strassen multiplication with an explicit configuration.
///
/// # Errors
///
/// Returns [`MatrixError::ValidationError`](crate::MatrixError::ValidationError)
/// if `config.cutoff == 0`, otherwise the same errors as [`multiply_strassen`].
pub fn multiply_strassen_with(a: &Matrix, b: &Matrix, config: &StrassenConfig) -> Result<Matrix> {
    config.validate()?;
    check_strassen_operands(a, b)?;
    Ok(strassen_recursive(a, b, config.cutoff, config.parallel_depth))
}

/// Strassen multiplication for any compatible `m x p` by `p x n` pair.
///
/// Both operands are zero-padded into `s x s` matrices, where `s` is the
/// smallest power of two `>= max(m, p, n)`. The padded product is computed with
/// the default configuration and then cropped back to `m x n`.
///
/// # Errors
///
/// Returns [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
/// if `a.cols() != b.rows()`.
pub fn multiply_strassen_padded(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    multiply_strassen_padded_with(a, b, &StrassenConfig::default())
}

/// [`multiply_strassen_padded`] with an explicit configuration.
pub fn multiply_strassen_padded_with(
    a: &Matrix,
    b: &Matrix,
    config: &StrassenConfig,
) -> Result<Matrix> {
    config.validate()?;
    if a.cols() != b.rows() {
        return Err(dimension_mismatch(
            a.shape(),
            b.shape(),
            "columns of the left operand must equal rows of the right operand",
        ));
    }

    let (m, p, n) = (a.rows(), a.cols(), b.cols());
    if m == 0 || p == 0 || n == 0 {
        return Ok(Matrix::zeros(m, n));
    }

    let size = m.max(p).max(n).next_power_of_two();
    let product = if a.shape() == (size, size) && b.shape() == (size, size) {
        strassen_recursive(a, b, config.cutoff, config.parallel_depth)
    } else {
        let a_padded = a.padded(size, size);
        let b_padded = b.padded(size, size);
        strassen_recursive(&a_padded, &b_padded, config.cutoff, config.parallel_depth)
    };

    if product.shape() == (m, n) {
        Ok(product)
    } else {
        Ok(product.cropped(m, n))
    }
}

/// Number of quadrant splits the recursion performs on an `n x n` input
/// before reaching the naive base case.
///
/// For `n` and `cutoff` powers of two with `n > cutoff` this is
/// `log2(n) - log2(cutoff)`; otherwise it is 0.
pub fn recursion_depth(n: usize, cutoff: usize) -> usize {
    let cutoff = cutoff.max(1);
    let mut size = n;
    let mut depth = 0;
    while size > cutoff && size % 2 == 0 {
        size /= 2;
        depth += 1;
    }
    depth
}

fn check_strassen_operands(a: &Matrix, b: &Matrix) -> Result<()> {
    for operand in [a, b] {
        if !operand.is_square() {
            return Err(shape_error(
                operand.rows(),
                operand.cols(),
                "strassen operands must be square",
            ));
        }
    }
    if a.rows() != b.rows() {
        return Err(shape_error(
            b.rows(),
            b.cols(),
            format!(
                "strassen operands must share one dimension, left operand is {}x{}",
                a.rows(),
                a.cols()
            ),
        ));
    }
    if !a.rows().is_power_of_two() {
        return Err(shape_error(
            a.rows(),
            a.cols(),
            "strassen dimension must be a power of two",
        ));
    }
    Ok(())
}

type ElementwiseOp = fn(&Matrix, &Matrix) -> Matrix;

fn strassen_recursive(a: &Matrix, b: &Matrix, cutoff: usize, parallel_depth: usize) -> Matrix {
    let n = a.rows();

    if n <= cutoff {
        return ikj_product(a, b);
    }

    debug_assert!(n % 2 == 0, "split of odd dimension {}", n);

    let Quadrants {
        q11: a11,
        q12: a12,
        q21: a21,
        q22: a22,
    } = a.split_unchecked();
    let Quadrants {
        q11: b11,
        q12: b12,
        q21: b21,
        q22: b22,
    } = b.split_unchecked();

    let (add, sub): (ElementwiseOp, ElementwiseOp) = if parallel_depth > 0 {
        (Matrix::par_add_unchecked, Matrix::par_sub_unchecked)
    } else {
        (Matrix::add_unchecked, Matrix::sub_unchecked)
    };

    let next_depth = parallel_depth.saturating_sub(1);
    let mul = |x: &Matrix, y: &Matrix| strassen_recursive(x, y, cutoff, next_depth);

    let p1 = || mul(&add(&a11, &a22), &add(&b11, &b22));
    let p2 = || mul(&add(&a21, &a22), &b11);
    let p3 = || mul(&a11, &sub(&b12, &b22));
    let p4 = || mul(&a22, &sub(&b21, &b11));
    let p5 = || mul(&add(&a11, &a12), &b22);
    let p6 = || mul(&sub(&a21, &a11), &add(&b11, &b12));
    let p7 = || mul(&sub(&a12, &a22), &add(&b21, &b22));

    let (m1, m2, m3, m4, m5, m6, m7) = if parallel_depth > 0 {
        let ((m1, m2), ((m3, m4), ((m5, m6), m7))) = rayon::join(
            || rayon::join(p1, p2),
            || rayon::join(|| rayon::join(p3, p4), || rayon::join(|| rayon::join(p5, p6), p7)),
        );
        (m1, m2, m3, m4, m5, m6, m7)
    } else {
        (p1(), p2(), p3(), p4(), p5(), p6(), p7())
    };

    Quadrants {
        q11: add(&sub(&add(&m1, &m4), &m5), &m7),
        q12: add(&m3, &m5),
        q21: add(&m2, &m4),
        q22: add(&sub(&add(&m1, &m3), &m2), &m6),
    }
    .combine_unchecked()
}
