//! Helpers around the multiplication engine: random input generation,
//! approximate comparison and console formatting.
//!
//! None of these are used by the engine itself.

use std::fmt::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::matrix::Matrix;

/// Exclusive upper bound of generated values; the range is `[0, RANDOM_UPPER)`.
pub const RANDOM_UPPER: f64 = 10.0;

/// Generates a `rows x cols` matrix of values in `[0, 10)` from the thread-local RNG.
pub fn generate_random(rows: usize, cols: usize) -> Matrix {
    generate_random_with(&mut rand::rng(), rows, cols)
}

/// Deterministic version of [`generate_random`].
pub fn generate_random_seeded(rows: usize, cols: usize, seed: u64) -> Matrix {
    generate_random_with(&mut StdRng::seed_from_u64(seed), rows, cols)
}

/// Generates a `rows x cols` matrix of values in `[0, 10)` from `rng`.
pub fn generate_random_with<R: Rng>(rng: &mut R, rows: usize, cols: usize) -> Matrix {
    Matrix::from_fn(rows, cols, |_, _| rng.random_range(0.0..RANDOM_UPPER))
}

/// True when both matrices have the same shape and every pair of elements
/// differs by at most `epsilon` (absolute).
pub fn approx_equal(a: &Matrix, b: &Matrix, epsilon: f64) -> bool {
    if a.shape() != b.shape() {
        return false;
    }
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .all(|(x, y)| (x - y).abs() <= epsilon)
}

/// Largest absolute elementwise difference, or `None` when the shapes differ.
/// Two empty matrices of the same shape give `Some(0.0)`.
pub fn max_abs_diff(a: &Matrix, b: &Matrix) -> Option<f64> {
    if a.shape() != b.shape() {
        return None;
    }
    Some(
        a.as_slice()
            .iter()
            .zip(b.as_slice())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max),
    )
}

/// Renders a matrix with two decimals, tab-separated, one row per line.
pub fn format_matrix(m: &Matrix) -> String {
    let mut out = String::new();
    for i in 0..m.rows() {
        for value in m.row(i) {
            // Writing into a String cannot fail
            let _ = write!(out, "{:.2}\t", value);
        }
        out.push('\n');
    }
    out
}

/// Prints [`format_matrix`] to stdout.
pub fn print_matrix(m: &Matrix) {
    print!("{}", format_matrix(m));
}
