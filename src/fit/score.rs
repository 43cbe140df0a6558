//! Goodness-of-fit scoring.
//!
//! R² = 1 − SS_res/SS_tot, computed against the original sample points with
//! the unrounded coefficients. Zero total variance (all y identical) is not an
//! error: a perfect fit there scores `Defined(1.0)` and anything else scores
//! `Undefined`, which the selector ranks below every defined value.

use crate::domain::{ModelFamily, RSquared, SamplePoint};
use crate::models::predict;

/// Score a fitted family against the sample points.
///
/// Returns `None` when the residual sum is non-finite (a prediction overflowed
/// or left the family's domain); callers treat that candidate as failed.
pub fn r_squared(family: ModelFamily, coeffs: &[f64], points: &[SamplePoint]) -> Option<RSquared> {
    if points.is_empty() {
        return None;
    }

    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for p in points {
        let r = p.y - predict(family, p.x, coeffs);
        ss_res += r * r;
        let d = p.y - mean_y;
        ss_tot += d * d;
    }

    if !ss_res.is_finite() || !ss_tot.is_finite() {
        return None;
    }

    if ss_tot == 0.0 {
        return Some(if ss_res == 0.0 {
            RSquared::Defined(1.0)
        } else {
            RSquared::Undefined
        });
    }

    let r2 = 1.0 - ss_res / ss_tot;
    if r2.is_finite() {
        Some(RSquared::Defined(r2))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(pairs: &[(f64, f64)]) -> Vec<SamplePoint> {
        pairs.iter().map(|&(x, y)| SamplePoint::new(x, y)).collect()
    }

    #[test]
    fn perfect_linear_fit_scores_one() {
        let points = pts(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        let r2 = r_squared(ModelFamily::Linear, &[2.0, 0.0], &points).unwrap();
        assert_eq!(r2, RSquared::Defined(1.0));
    }

    #[test]
    fn poor_fit_scores_below_one_and_can_go_negative() {
        let points = pts(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        // A constant far from the data is worse than the mean.
        let r2 = r_squared(ModelFamily::Linear, &[0.0, 100.0], &points).unwrap();
        match r2 {
            RSquared::Defined(v) => assert!(v < 0.0),
            RSquared::Undefined => panic!("expected defined score"),
        }
    }

    #[test]
    fn zero_variance_exact_match_is_one() {
        let points = pts(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]);
        let r2 = r_squared(ModelFamily::Linear, &[0.0, 5.0], &points).unwrap();
        assert_eq!(r2, RSquared::Defined(1.0));
    }

    #[test]
    fn zero_variance_mismatch_is_undefined() {
        let points = pts(&[(1.0, 5.0), (2.0, 5.0)]);
        let r2 = r_squared(ModelFamily::Linear, &[0.0, 4.0], &points).unwrap();
        assert_eq!(r2, RSquared::Undefined);
    }

    #[test]
    fn non_finite_predictions_fail_the_score() {
        // ln(x) at x = -1 is NaN, so the residual sum is NaN.
        let points = pts(&[(-1.0, 5.0), (2.0, 5.0)]);
        assert!(r_squared(ModelFamily::Logarithmic, &[1.0, 0.0], &points).is_none());
    }
}
