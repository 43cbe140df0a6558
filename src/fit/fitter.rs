//! Closed-form fitting routines, one per model family.
//!
//! Each fitter takes the sample set and returns the fitted coefficients, or
//! fails with `FitError::UnfittableModel` when the data is incompatible with
//! the family's domain:
//!
//! - Exponential requires all y > 0
//! - Logarithmic requires all x > 0
//! - Power requires all x > 0 and all y > 0
//! - Linear and Quadratic are defined for any finite sample of ≥ 1 point
//!
//! Every solve is deterministic and single-pass: the nonlinear families are
//! log-linearized onto the shared `slope_intercept` solver and the quadratic
//! fit solves its normal equations via SVD. Non-finite coefficients are
//! reported as `UnfittableModel` rather than propagated.

use nalgebra::{DMatrix, DVector};

use crate::domain::{ModelFamily, SamplePoint};
use crate::error::FitError;
use crate::math::{slope_intercept, solve_least_squares};

/// Fit a single family, returning its coefficient vector.
pub fn fit_family(family: ModelFamily, points: &[SamplePoint]) -> Result<Vec<f64>, FitError> {
    if points.is_empty() {
        return Err(FitError::unfittable(family, "no sample points"));
    }
    // Reject NaN/infinite samples up front: the SVD solve must only ever see
    // finite input, and the log transforms would silently launder infinities.
    if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(FitError::unfittable(family, "non-finite sample values"));
    }
    check_domain(family, points)?;

    let coeffs = match family {
        ModelFamily::Linear => fit_linear(points),
        ModelFamily::Exponential => fit_exponential(points),
        ModelFamily::Logarithmic => fit_logarithmic(points),
        ModelFamily::Power => fit_power(points),
        ModelFamily::Quadratic => fit_quadratic(points),
    };

    match coeffs {
        Some(c) if c.iter().all(|v| v.is_finite()) => Ok(c),
        _ => Err(FitError::unfittable(family, "fit produced non-finite coefficients")),
    }
}

fn check_domain(family: ModelFamily, points: &[SamplePoint]) -> Result<(), FitError> {
    if family.requires_positive_x() && points.iter().any(|p| !(p.x > 0.0)) {
        return Err(FitError::unfittable(family, "requires all x > 0"));
    }
    if family.requires_positive_y() && points.iter().any(|p| !(p.y > 0.0)) {
        return Err(FitError::unfittable(family, "requires all y > 0"));
    }
    Ok(())
}

/// `y = a·x + b` by ordinary least squares.
fn fit_linear(points: &[SamplePoint]) -> Option<Vec<f64>> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let line = slope_intercept(&xs, &ys)?;
    Some(vec![line.slope, line.intercept])
}

/// `y = a·e^(b·x)` via regression of ln(y) against x.
fn fit_exponential(points: &[SamplePoint]) -> Option<Vec<f64>> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ln_ys: Vec<f64> = points.iter().map(|p| p.y.ln()).collect();
    let line = slope_intercept(&xs, &ln_ys)?;
    Some(vec![line.intercept.exp(), line.slope])
}

/// `y = a·ln(x) + b` via regression of y against ln(x).
fn fit_logarithmic(points: &[SamplePoint]) -> Option<Vec<f64>> {
    let ln_xs: Vec<f64> = points.iter().map(|p| p.x.ln()).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let line = slope_intercept(&ln_xs, &ys)?;
    Some(vec![line.slope, line.intercept])
}

/// `y = a·x^b` via regression of ln(y) against ln(x).
fn fit_power(points: &[SamplePoint]) -> Option<Vec<f64>> {
    let ln_xs: Vec<f64> = points.iter().map(|p| p.x.ln()).collect();
    let ln_ys: Vec<f64> = points.iter().map(|p| p.y.ln()).collect();
    let line = slope_intercept(&ln_xs, &ln_ys)?;
    Some(vec![line.intercept.exp(), line.slope])
}

/// `y = a·x² + b·x + c` by normal-equations least squares on [x², x, 1].
///
/// Fewer than 3 distinct x values makes the design matrix rank-deficient; the
/// SVD pseudo-inverse still produces a best-effort fit there, and if it
/// declines we fall back to the linear fit with a zero quadratic term so the
/// family stays viable for any finite input.
fn fit_quadratic(points: &[SamplePoint]) -> Option<Vec<f64>> {
    let n = points.len();
    let mut design = DMatrix::<f64>::zeros(n, 3);
    let mut y = DVector::<f64>::zeros(n);
    for (i, p) in points.iter().enumerate() {
        design[(i, 0)] = p.x * p.x;
        design[(i, 1)] = p.x;
        design[(i, 2)] = 1.0;
        y[i] = p.y;
    }

    if let Some(beta) = solve_least_squares(&design, &y) {
        if beta.iter().all(|v| v.is_finite()) {
            return Some(vec![beta[0], beta[1], beta[2]]);
        }
    }

    let line = fit_linear(points)?;
    Some(vec![0.0, line[0], line[1]])
}
