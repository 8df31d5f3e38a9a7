use crate::error::{dimension_mismatch, Result};

use super::Matrix;

impl Matrix {
    /// Elementwise sum `self + rhs` as a new matrix.
    ///
    /// Neither operand is modified.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
    /// if the shapes differ.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape(rhs, "addition")?;
        Ok(self.add_unchecked(rhs))
    }

    /// Elementwise difference `self - rhs` as a new matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
    /// if the shapes differ.
    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape(rhs, "subtraction")?;
        Ok(self.sub_unchecked(rhs))
    }

    /// Same as [`Matrix::add`], with rows summed in parallel.
    pub fn par_add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape(rhs, "addition")?;
        Ok(self.par_add_unchecked(rhs))
    }

    /// Same as [`Matrix::sub`], with rows subtracted in parallel.
    pub fn par_sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape(rhs, "subtraction")?;
        Ok(self.par_sub_unchecked(rhs))
    }

    fn check_same_shape(&self, rhs: &Matrix, op: &str) -> Result<()> {
        if self.shape() != rhs.shape() {
            return Err(dimension_mismatch(
                self.shape(),
                rhs.shape(),
                format!("elementwise {} requires identical shapes", op),
            ));
        }
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn add_unchecked(&self, rhs: &Matrix) -> Matrix {
        debug_assert_eq!(self.shape(), rhs.shape());
        let data = self
            .as_slice()
            .iter()
            .zip(rhs.as_slice())
            .map(|(x, y)| x + y)
            .collect();
        Matrix::from_raw(self.rows(), self.cols(), data)
    }

    #[inline(always)]
    pub(crate) fn sub_unchecked(&self, rhs: &Matrix) -> Matrix {
        debug_assert_eq!(self.shape(), rhs.shape());
        let data = self
            .as_slice()
            .iter()
            .zip(rhs.as_slice())
            .map(|(x, y)| x - y)
            .collect();
        Matrix::from_raw(self.rows(), self.cols(), data)
    }

    pub(crate) fn par_add_unchecked(&self, rhs: &Matrix) -> Matrix {
        debug_assert_eq!(self.shape(), rhs.shape());
        let cols = self.cols();
        let (a, b) = (self.as_slice(), rhs.as_slice());
        Matrix::par_from_fn(self.rows(), cols, |i, j| a[i * cols + j] + b[i * cols + j])
    }

    pub(crate) fn par_sub_unchecked(&self, rhs: &Matrix) -> Matrix {
        debug_assert_eq!(self.shape(), rhs.shape());
        let cols = self.cols();
        let (a, b) = (self.as_slice(), rhs.as_slice());
        Matrix::par_from_fn(self.rows(), cols, |i, j| a[i * cols + j] - b[i * cols + j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixError;

    fn sample(rows: usize, cols: usize, scale: f64) -> Matrix {
        Matrix::from_fn(rows, cols, |i, j| scale * (i * cols + j) as f64 + 0.25)
    }

    #[test]
    fn test_add_and_sub() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();

        let sum = a.add(&b).unwrap();
        let diff = a.sub(&b).unwrap();

        assert_eq!(sum.to_rows(), vec![vec![6.0, 8.0], vec![10.0, 12.0]]);
        assert_eq!(diff.to_rows(), vec![vec![-4.0, -4.0], vec![-4.0, -4.0]]);
    }

    #[test]
    fn test_operands_are_not_mutated() {
        let a = sample(4, 4, 1.0);
        let b = sample(4, 4, -2.0);
        let (a_before, b_before) = (a.clone(), b.clone());

        let _ = a.add(&b).unwrap();
        let _ = a.sub(&b).unwrap();
        let _ = a.par_add(&b).unwrap();

        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(3, 2);

        for result in [a.add(&b), a.sub(&b), a.par_add(&b), a.par_sub(&b)] {
            match result {
                Err(MatrixError::DimensionMismatch { left, right, .. }) => {
                    assert_eq!(left, (2, 3));
                    assert_eq!(right, (3, 2));
                }
                other => panic!("expected DimensionMismatch, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let a = sample(33, 21, 0.75);
        let b = sample(33, 21, -1.5);

        assert_eq!(a.par_add(&b).unwrap(), a.add(&b).unwrap());
        assert_eq!(a.par_sub(&b).unwrap(), a.sub(&b).unwrap());
    }
}
