//! Least squares solvers.
//!
//! The whole engine reduces to two primitives:
//!
//! - `slope_intercept`: closed-form simple linear regression. The linear fit
//!   uses it directly; the exponential, logarithmic, and power fits call it
//!   with log-transformed inputs instead of duplicating the algebra.
//! - `solve_least_squares`: a general least-squares solve for the quadratic
//!   fit's normal equations on the [x², x, 1] design matrix.
//!
//! Implementation choices:
//! - All arithmetic is double precision; nothing is rounded before scoring.
//! - The general solve uses SVD so it stays robust when the design matrix is
//!   tall (more rows than columns) or rank-deficient (fewer than 3 distinct
//!   x values). (Nalgebra's `QR::solve` is intended for square systems and
//!   will panic for non-square matrices.)

use nalgebra::{DMatrix, DVector};

/// Slope and intercept of a simple linear regression `y ≈ slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

/// Closed-form ordinary least squares for paired sequences.
///
/// Degenerate inputs are handled rather than rejected:
/// - fewer than 2 distinct x values collapses to a horizontal line through the
///   mean y (slope 0)
/// - a single point is a horizontal line through that point
///
/// Returns `None` for empty input or when the result is non-finite
/// (NaN/infinite samples propagate here and are caught by the finiteness check).
pub fn slope_intercept(xs: &[f64], ys: &[f64]) -> Option<Line> {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n == 0 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = xs.iter().sum::<f64>() / n_f;
    let mean_y = ys.iter().sum::<f64>() / n_f;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    // A NaN x poisons sxx; it must not be mistaken for the zero-spread case.
    if !sxx.is_finite() {
        return None;
    }

    let (slope, intercept) = if sxx > 0.0 {
        let slope = sxy / sxx;
        (slope, mean_y - slope * mean_x)
    } else {
        // No spread in x: horizontal line through the mean.
        (0.0, mean_y)
    };

    if slope.is_finite() && intercept.is_finite() {
        Some(Line { slope, intercept })
    } else {
        None
    }
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails. The quadratic
    // design matrix becomes rank-deficient for fewer than 3 distinct x values,
    // and the SVD pseudo-inverse still yields a usable minimum-norm solution.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_intercept_recovers_exact_line() {
        // y = 2x + 3 on x = [0, 1, 2]
        let xs = [0.0, 1.0, 2.0];
        let ys = [3.0, 5.0, 7.0];
        let line = slope_intercept(&xs, &ys).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-12);
        assert!((line.intercept - 3.0).abs() < 1e-12);
    }

    #[test]
    fn slope_intercept_degenerates_to_horizontal_line() {
        // All x identical: slope 0, intercept = mean y.
        let xs = [2.0, 2.0, 2.0];
        let ys = [1.0, 2.0, 3.0];
        let line = slope_intercept(&xs, &ys).unwrap();
        assert_eq!(line.slope, 0.0);
        assert!((line.intercept - 2.0).abs() < 1e-12);

        // Single point: horizontal line through it.
        let line = slope_intercept(&[5.0], &[7.0]).unwrap();
        assert_eq!(line.slope, 0.0);
        assert_eq!(line.intercept, 7.0);
    }

    #[test]
    fn slope_intercept_rejects_non_finite_input() {
        assert!(slope_intercept(&[1.0, f64::NAN], &[1.0, 2.0]).is_none());
        assert!(slope_intercept(&[1.0, 2.0], &[1.0, f64::INFINITY]).is_none());
        assert!(slope_intercept(&[], &[]).is_none());
    }

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_handles_rank_deficient_system() {
        // One observation, three unknowns: the minimum-norm solution still
        // reproduces the observation exactly.
        let x = DMatrix::from_row_slice(1, 3, &[4.0, 2.0, 1.0]);
        let y = DVector::from_row_slice(&[9.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        let fitted = 4.0 * beta[0] + 2.0 * beta[1] + beta[2];
        assert!((fitted - 9.0).abs() < 1e-9);
    }
}
