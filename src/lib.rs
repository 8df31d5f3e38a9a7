//! Dense `f64` matrix multiplication: the naive triple loop against Strassen's
//! divide-and-conquer algorithm.
//!
//! ## Usage
//!
//! ```
//! use strassen::{multiply_naive, multiply_strassen, Matrix};
//!
//! let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
//!
//! let naive = multiply_naive(&a, &b).unwrap();
//! let fast = multiply_strassen(&a, &b).unwrap();
//!
//! assert_eq!(naive.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
//! assert_eq!(fast, naive);
//! ```
//!
//! Shape problems come back as [`MatrixError`] values, never as panics:
//!
//! ```
//! use strassen::{multiply_strassen, Matrix, MatrixError};
//!
//! let a = Matrix::identity(3);
//! assert!(matches!(multiply_strassen(&a, &a), Err(MatrixError::ShapeError { .. })));
//! ```
//!
//! ## What's inside
//!
//! - `matrix`: row-major storage, elementwise add/subtract, quadrant split/combine
//! - `naive`: i-j-k, cache-friendly i-k-j and tiled multiplication
//! - `strassen`: sequential, fork-join parallel and zero-padded Strassen
//! - `utils`: random generation, approximate comparison, printing
//! - `harness`: the timing/validation loop behind the `strassen` binary

pub mod error;
pub mod harness;
pub mod matrix;
pub mod naive;
pub mod strassen;
pub mod traits;
pub mod utils;

pub use error::{MatrixError, Result};
pub use matrix::{Matrix, Quadrants};
pub use naive::{multiply_blocked, multiply_naive, multiply_naive_ijk, multiply_naive_ikj};
pub use strassen::{
    multiply_strassen, multiply_strassen_padded, multiply_strassen_parallel,
    multiply_strassen_with, StrassenConfig,
};
pub use traits::MatMul;

/// Strassen recursion stops at this dimension and falls back to the naive kernel.
pub const CUTOFF: usize = 64;

/// Default absolute per-element tolerance when comparing products.
pub const EPSILON: f64 = 1e-9;

/// Recursion levels whose seven sub-products are forked by the parallel variant.
pub const PARALLEL_DEPTH: usize = 2;

/// Tile edge for [`multiply_blocked`].
pub const DEFAULT_BLOCK: usize = 64;
