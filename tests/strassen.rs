//! Strassen against the naive reference.
//!
//! Random real-valued inputs are compared within `EPSILON`. Integer-valued
//! inputs keep every intermediate sum exactly representable, which lets the
//! deep-recursion tests (cutoff 1 or 2) demand bit-exact agreement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strassen::strassen::{multiply_strassen_padded_with, recursion_depth};
use strassen::utils::{approx_equal, generate_random_seeded, max_abs_diff};
use strassen::{
    multiply_naive, multiply_naive_ikj, multiply_strassen, multiply_strassen_padded,
    multiply_strassen_parallel, multiply_strassen_with, MatMul, Matrix, MatrixError,
    StrassenConfig, CUTOFF, EPSILON,
};

fn integer_matrix(rng: &mut StdRng, n: usize) -> Matrix {
    Matrix::from_fn(n, n, |_, _| rng.random_range(-9..=9) as f64)
}

fn assert_within_epsilon(expected: &Matrix, actual: &Matrix, name: &str) {
    let diff = max_abs_diff(expected, actual).expect("shapes must match");
    assert!(
        diff <= EPSILON,
        "{}: max abs difference {:.3e} exceeds {:.0e}",
        name,
        diff,
        EPSILON
    );
}

#[test]
fn test_known_two_by_two() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
    let expected = vec![vec![19.0, 22.0], vec![43.0, 50.0]];

    let recursed = multiply_strassen_with(&a, &b, &StrassenConfig::with_cutoff(1)).unwrap();
    assert_eq!(recursed.to_rows(), expected);

    let default_cutoff = multiply_strassen(&a, &b).unwrap();
    assert_eq!(default_cutoff.to_rows(), expected);
}

#[test]
fn test_identity_squared_is_exact() {
    let id = Matrix::identity(2);
    let c = multiply_strassen_with(&id, &id, &StrassenConfig::with_cutoff(1)).unwrap();
    assert_eq!(c, id);
}

#[test]
fn test_matches_naive_on_random_inputs() {
    let cases = [
        (1, CUTOFF),
        (2, 1),
        (8, 2),
        (64, 8),
        (128, 16),
        (128, CUTOFF),
        (256, CUTOFF),
    ];

    for (seed, &(n, cutoff)) in cases.iter().enumerate() {
        let a = generate_random_seeded(n, n, 2 * seed as u64);
        let b = generate_random_seeded(n, n, 2 * seed as u64 + 1);

        let reference = multiply_naive(&a, &b).unwrap();
        let fast = multiply_strassen_with(&a, &b, &StrassenConfig::with_cutoff(cutoff)).unwrap();

        assert_within_epsilon(&reference, &fast, &format!("n = {}, cutoff = {}", n, cutoff));
    }
}

#[test]
fn test_deep_recursion_is_exact_on_integers() {
    let mut rng = StdRng::seed_from_u64(77);
    for n in [2, 4, 16, 64] {
        let a = integer_matrix(&mut rng, n);
        let b = integer_matrix(&mut rng, n);
        let reference = multiply_naive(&a, &b).unwrap();

        for cutoff in [1, 2] {
            let fast = multiply_strassen_with(&a, &b, &StrassenConfig::with_cutoff(cutoff)).unwrap();
            assert_eq!(fast, reference, "n = {}, cutoff = {}", n, cutoff);
        }
    }
}

#[test]
fn test_one_extra_level_matches_direct_naive() {
    // n = 2 * CUTOFF: the default cutoff recurses exactly once, a cutoff of n
    // goes straight to the naive kernel.
    let n = 2 * CUTOFF;
    let a = generate_random_seeded(n, n, 500);
    let b = generate_random_seeded(n, n, 501);

    assert_eq!(recursion_depth(n, CUTOFF), 1);
    assert_eq!(recursion_depth(n, n), 0);

    let one_level = multiply_strassen_with(&a, &b, &StrassenConfig::with_cutoff(CUTOFF)).unwrap();
    let direct = multiply_strassen_with(&a, &b, &StrassenConfig::with_cutoff(n)).unwrap();

    assert_eq!(direct, multiply_naive_ikj(&a, &b).unwrap());
    assert_within_epsilon(&direct, &one_level, "one level vs direct");
}

#[test]
fn test_identity_law() {
    let n = 128;
    let a = generate_random_seeded(n, n, 9);
    let id = Matrix::identity(n);
    let config = StrassenConfig::with_cutoff(16);

    let left = multiply_strassen_with(&id, &a, &config).unwrap();
    let right = multiply_strassen_with(&a, &id, &config).unwrap();

    assert_within_epsilon(&a, &left, "I * A");
    assert_within_epsilon(&a, &right, "A * I");
}

#[test]
fn test_shape_errors() {
    let three = Matrix::identity(3);
    assert!(matches!(
        multiply_strassen(&three, &three),
        Err(MatrixError::ShapeError { rows: 3, cols: 3, .. })
    ));

    let four = Matrix::identity(4);
    let eight = Matrix::identity(8);
    assert!(matches!(
        multiply_strassen(&four, &eight),
        Err(MatrixError::ShapeError { .. })
    ));

    let tall = Matrix::zeros(8, 4);
    assert!(matches!(
        multiply_strassen(&tall, &four),
        Err(MatrixError::ShapeError { .. })
    ));

    assert!(three.strassen_mul(&three).is_err());
    assert!(three.par_strassen_mul(&three).is_err());
}

#[test]
fn test_parallel_matches_sequential() {
    for (n, cutoff, depth) in [(64, 8, 1), (128, 16, 2), (256, CUTOFF, 3)] {
        let a = generate_random_seeded(n, n, n as u64);
        let b = generate_random_seeded(n, n, n as u64 + 1);

        let sequential = StrassenConfig::with_cutoff(cutoff);
        let c_seq = multiply_strassen_with(&a, &b, &sequential).unwrap();
        let c_par = multiply_strassen_with(&a, &b, &sequential.parallel(depth)).unwrap();

        assert_eq!(c_seq, c_par, "n = {}, cutoff = {}, depth = {}", n, cutoff, depth);
    }

    let a = generate_random_seeded(256, 256, 1);
    let b = generate_random_seeded(256, 256, 2);
    assert_eq!(
        multiply_strassen_parallel(&a, &b).unwrap(),
        multiply_strassen(&a, &b).unwrap()
    );
    assert_eq!(a.par_strassen_mul(&b).unwrap(), a.strassen_mul(&b).unwrap());
}

#[test]
fn test_padded_handles_any_compatible_shape() {
    for (m, p, n) in [(3, 3, 3), (5, 9, 2), (1, 17, 1), (70, 65, 66)] {
        let a = generate_random_seeded(m, p, (m * p) as u64);
        let b = generate_random_seeded(p, n, (p * n) as u64);

        let reference = multiply_naive(&a, &b).unwrap();
        let padded = multiply_strassen_padded_with(&a, &b, &StrassenConfig::with_cutoff(16)).unwrap();

        assert_eq!(padded.shape(), (m, n));
        assert_within_epsilon(&reference, &padded, &format!("padded {}x{}x{}", m, p, n));
    }

    let a = generate_random_seeded(3, 3, 0);
    let c = multiply_strassen_padded(&a, &a).unwrap();
    assert!(approx_equal(&c, &multiply_naive(&a, &a).unwrap(), EPSILON));
}

#[test]
fn test_inputs_are_untouched() {
    let a = generate_random_seeded(32, 32, 10);
    let b = generate_random_seeded(32, 32, 11);
    let (a_before, b_before) = (a.clone(), b.clone());

    let _ = multiply_strassen_with(&a, &b, &StrassenConfig::with_cutoff(2)).unwrap();
    let _ = multiply_strassen_with(&a, &b, &StrassenConfig::with_cutoff(2).parallel(2)).unwrap();

    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}
