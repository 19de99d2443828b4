//! Numeric solution of square linear systems.

use algebrist_error::Error;
use crate::error::{DimensionMismatch, SingularMatrix};
use nalgebra::{DMatrix, DVector};

/// Determinants with a smaller magnitude than this are treated as zero.
pub const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Solves the square linear system `matrix * v = rhs` with LU decomposition.
///
/// Each entry of `matrix` is one row. Returns a [`DimensionMismatch`] error if the system is not
/// square or `rhs` has the wrong length, and a [`SingularMatrix`] error if the system has no
/// unique solution.
pub fn solve_linear(matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>, Error> {
    let n = matrix.len();
    if let Some(row) = matrix.iter().find(|row| row.len() != n) {
        return Err(Error::new(Vec::new(), DimensionMismatch { expected: n, found: row.len() }));
    }
    if rhs.len() != n {
        return Err(Error::new(Vec::new(), DimensionMismatch { expected: n, found: rhs.len() }));
    }

    let a = DMatrix::from_fn(n, n, |row, col| matrix[row][col]);
    let b = DVector::from_column_slice(rhs);

    let lu = a.lu();
    if n == 0 || lu.determinant().abs() < SINGULAR_TOLERANCE {
        return Err(Error::new(Vec::new(), SingularMatrix));
    }

    let solution = lu.solve(&b).ok_or_else(|| Error::new(Vec::new(), SingularMatrix))?;
    tracing::trace!(?solution, "solved {}x{} linear system", n, n);
    Ok(solution.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use super::*;

    #[test]
    fn two_by_two() {
        // 2x + 3y = 7, 4x - y = 5
        let solution = solve_linear(&[vec![2.0, 3.0], vec![4.0, -1.0]], &[7.0, 5.0]).unwrap();
        assert_relative_eq!(solution[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(solution[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn three_by_three() {
        // x + y + z = 6, 2y + 5z = -4, 2x + 5y - z = 27
        let solution = solve_linear(
            &[vec![1.0, 1.0, 1.0], vec![0.0, 2.0, 5.0], vec![2.0, 5.0, -1.0]],
            &[6.0, -4.0, 27.0],
        ).unwrap();
        assert_relative_eq!(solution[0], 5.0, epsilon = 1e-9);
        assert_relative_eq!(solution[1], 3.0, epsilon = 1e-9);
        assert_relative_eq!(solution[2], -2.0, epsilon = 1e-9);
    }

    #[test]
    fn singular() {
        let err = solve_linear(&[vec![1.0, 2.0], vec![2.0, 4.0]], &[3.0, 6.0]).unwrap_err();
        assert!(err.is::<SingularMatrix>());
    }

    #[test]
    fn not_square() {
        let err = solve_linear(&[vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 1.0]], &[3.0, 6.0]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DimensionMismatch>(),
            Some(&DimensionMismatch { expected: 2, found: 3 }),
        );
    }
}
