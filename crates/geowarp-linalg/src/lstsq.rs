use faer::prelude::SpSolverLstsq;
use thiserror::Error;

/// Relative threshold on the diagonal of `R` below which a column is treated as dependent.
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Errors raised by the dense solvers.
#[derive(Error, Debug, PartialEq)]
pub enum LinalgError {
    /// The right-hand side does not have one entry per matrix row.
    #[error("dimension mismatch: matrix has {rows} rows but the right-hand side has {rhs} entries")]
    DimensionMismatch {
        /// Rows of the matrix.
        rows: usize,
        /// Entries of the right-hand side.
        rhs: usize,
    },

    /// The system has fewer equations than unknowns.
    #[error("underdetermined system: {rows} equations for {cols} unknowns")]
    Underdetermined {
        /// Rows of the matrix.
        rows: usize,
        /// Columns of the matrix.
        cols: usize,
    },

    /// The matrix columns are (numerically) linearly dependent.
    #[error("matrix is rank deficient: numerical rank {rank} of {cols} columns")]
    RankDeficient {
        /// Number of columns whose pivot survived the tolerance.
        rank: usize,
        /// Columns of the matrix.
        cols: usize,
    },
}

/// Solve `min ||A·x - b||²` with faer's QR factorization.
///
/// The numerical rank is read off the diagonal of the thin `R` factor before the
/// system is solved, so dependent columns are reported instead of producing huge
/// coefficients.
///
/// # Arguments
///
/// * `a` - The `m x n` design matrix, `m >= n`.
/// * `b` - The right-hand side with `m` entries.
///
/// # Returns
///
/// The `n` coefficients minimizing the squared residual.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if `b` has the wrong length.
/// * [`LinalgError::Underdetermined`] if `m < n`.
/// * [`LinalgError::RankDeficient`] if a pivot of `R` is below
///   [`RANK_TOLERANCE`] times the largest pivot.
///
/// # Example
///
/// ```
/// use geowarp_linalg::solve_least_squares;
///
/// // fit y = 1 + 2x through three exact samples
/// let a = faer::Mat::<f64>::from_fn(3, 2, |r, c| if c == 0 { 1.0 } else { r as f64 });
/// let x = solve_least_squares(&a, &[1.0, 3.0, 5.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
pub fn solve_least_squares(a: &faer::Mat<f64>, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
    let (m, n) = (a.nrows(), a.ncols());
    if b.len() != m {
        return Err(LinalgError::DimensionMismatch { rows: m, rhs: b.len() });
    }
    if m < n {
        return Err(LinalgError::Underdetermined { rows: m, cols: n });
    }

    let qr = a.qr();
    let r = qr.compute_thin_r();

    let pivots: Vec<f64> = (0..n).map(|k| r.read(k, k).abs()).collect();
    let max_pivot = pivots.iter().copied().fold(0.0, f64::max);
    let threshold = RANK_TOLERANCE * max_pivot;
    let rank = pivots
        .iter()
        .filter(|&&p| max_pivot > 0.0 && p > threshold)
        .count();
    if rank < n {
        log::warn!("least squares: rank {} of {} columns", rank, n);
        return Err(LinalgError::RankDeficient { rank, cols: n });
    }

    let mat_b = faer::Mat::<f64>::from_fn(m, 1, |i, _| b[i]);
    let x = qr.solve_lstsq(mat_b);

    Ok((0..n).map(|i| x.read(i, 0)).collect())
}

#[cfg(test)]
mod tests {
    use super::{solve_least_squares, LinalgError};
    use approx::assert_relative_eq;

    #[test]
    fn square_system() -> Result<(), LinalgError> {
        let a = faer::mat![[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]];
        let x = solve_least_squares(&a, &[8.0, -11.0, -3.0])?;
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-10);
        assert_relative_eq!(x[2], -1.0, epsilon = 1e-10);
        Ok(())
    }

    #[test]
    fn overdetermined_line_fit() -> Result<(), LinalgError> {
        // y = 0.5 + 2x with symmetric noise of +-0.1 cancels out in the fit
        let xs = [0.0, 1.0, 2.0, 3.0];
        let noise = [0.1, -0.1, -0.1, 0.1];
        let a = faer::Mat::<f64>::from_fn(4, 2, |r, c| if c == 0 { 1.0 } else { xs[r] });
        let b: Vec<f64> = xs
            .iter()
            .zip(noise)
            .map(|(x, e)| 0.5 + 2.0 * x + e)
            .collect();
        let coeffs = solve_least_squares(&a, &b)?;
        assert_relative_eq!(coeffs[0], 0.5, epsilon = 1e-10);
        assert_relative_eq!(coeffs[1], 2.0, epsilon = 1e-10);

        let residual = (0..4)
            .map(|r| (a.read(r, 0) * coeffs[0] + a.read(r, 1) * coeffs[1] - b[r]).powi(2))
            .sum::<f64>();
        assert_relative_eq!(residual, 0.04, epsilon = 1e-10);
        Ok(())
    }

    #[test]
    fn rank_deficient_columns() {
        // third column is the sum of the first two
        let a = faer::Mat::<f64>::from_fn(4, 3, |r, c| match c {
            0 => 1.0,
            1 => r as f64,
            _ => 1.0 + r as f64,
        });
        let res = solve_least_squares(&a, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(res, Err(LinalgError::RankDeficient { rank: 2, cols: 3 }));
    }

    #[test]
    fn zero_matrix_is_rank_deficient() {
        let a = faer::Mat::<f64>::zeros(3, 2);
        let res = solve_least_squares(&a, &[0.0; 3]);
        assert_eq!(res, Err(LinalgError::RankDeficient { rank: 0, cols: 2 }));
    }

    #[test]
    fn shape_errors() {
        let a = faer::Mat::<f64>::zeros(2, 3);
        assert_eq!(
            solve_least_squares(&a, &[0.0; 2]),
            Err(LinalgError::Underdetermined { rows: 2, cols: 3 })
        );
        assert_eq!(
            solve_least_squares(&a, &[0.0; 5]),
            Err(LinalgError::DimensionMismatch { rows: 2, rhs: 5 })
        );
    }
}
