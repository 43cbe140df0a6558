//! Model selection across the five families.
//!
//! The selector runs every requested fitter, scores each candidate, and picks
//! the winner:
//!
//! 1. A family failing `UnfittableModel` is excluded, not fatal.
//! 2. `NoViableModel` only when every family failed (empty or non-finite
//!    input; Linear and Quadratic are viable for any finite sample).
//! 3. Winner = strictly greatest R²; exact ties go to the earlier family in
//!    Linear > Exponential > Logarithmic > Power > Quadratic order.
//!
//! The whole selection is a pure function of its input: repeated invocations
//! yield bit-identical coefficients, scores, and winner.

use std::cmp::Ordering;

use crate::domain::{FamilySpec, FittedModel, ModelFamily, SamplePoint};
use crate::error::FitError;
use crate::fit::fitter::fit_family;
use crate::fit::score::r_squared;
use crate::models::{equation_string, predict};

/// Output of fitting + selection.
#[derive(Debug, Clone)]
pub struct FitSelection {
    pub best: FittedModel,
    /// Fits for all surviving families, in priority order.
    pub fits: Vec<FittedModel>,
    /// Families that were excluded and why (for diagnostics).
    pub skipped: Vec<(ModelFamily, String)>,
    /// The winner evaluated at each distinct input x, sorted ascending.
    pub curve: Vec<SamplePoint>,
}

/// Fit all requested families and select the best model.
pub fn fit_and_select(
    points: &[SamplePoint],
    spec: FamilySpec,
) -> Result<FitSelection, FitError> {
    let mut fits: Vec<FittedModel> = Vec::new();
    let mut skipped = Vec::new();

    for family in spec.families() {
        match fit_candidate(family, points) {
            Ok(fit) => fits.push(fit),
            Err(FitError::UnfittableModel { reason, .. }) => skipped.push((family, reason)),
            // The fitters only ever raise UnfittableModel, but exclusion is the
            // right recovery for any per-family failure.
            Err(err) => skipped.push((family, err.to_string())),
        }
    }

    let Some(mut best) = fits.first().cloned() else {
        return Err(FitError::NoViableModel);
    };

    // `fits` is in priority order, so replacing only on a strictly greater
    // score implements the tie-break for free.
    for fit in &fits[1..] {
        if fit.r2.ranking_cmp(best.r2) == Ordering::Greater {
            best = fit.clone();
        }
    }

    let curve = predicted_curve(&best, points);

    Ok(FitSelection {
        best,
        fits,
        skipped,
        curve,
    })
}

fn fit_candidate(family: ModelFamily, points: &[SamplePoint]) -> Result<FittedModel, FitError> {
    let coeffs = fit_family(family, points)?;
    let r2 = r_squared(family, &coeffs, points)
        .ok_or_else(|| FitError::unfittable(family, "fit score is non-finite"))?;

    Ok(FittedModel {
        family,
        display_name: family.display_name().to_string(),
        equation: equation_string(family, &coeffs),
        coeffs,
        r2,
    })
}

/// Evaluate a fitted model at each distinct input x, sorted ascending.
///
/// Stable input for chart rendering: duplicated x values collapse to one
/// predicted point.
pub fn predicted_curve(fit: &FittedModel, points: &[SamplePoint]) -> Vec<SamplePoint> {
    let mut xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    xs.dedup();

    xs.into_iter()
        .map(|x| SamplePoint::new(x, predict(fit.family, x, &fit.coeffs)))
        .collect()
}

/// Evaluate a fitted model on a regularly spaced grid (for smooth display).
pub fn fitted_grid(fit: &FittedModel, x_min: f64, x_max: f64, n: usize) -> Vec<SamplePoint> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        out.push(SamplePoint::new(x, predict(fit.family, x, &fit.coeffs)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RSquared;

    fn pts(pairs: &[(f64, f64)]) -> Vec<SamplePoint> {
        pairs.iter().map(|&(x, y)| SamplePoint::new(x, y)).collect()
    }

    fn r2_of(selection: &FitSelection, family: ModelFamily) -> RSquared {
        selection
            .fits
            .iter()
            .find(|f| f.family == family)
            .map(|f| f.r2)
            .unwrap_or(RSquared::Undefined)
    }

    #[test]
    fn perfect_line_selects_linear_with_r2_one() {
        let points = pts(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
        let selection = fit_and_select(&points, FamilySpec::Auto).unwrap();

        assert_eq!(selection.best.family, ModelFamily::Linear);
        assert_eq!(selection.best.r2, RSquared::Defined(1.0));
        assert!((selection.best.coeffs[0] - 2.0).abs() < 1e-12);
        assert!(selection.best.coeffs[1].abs() < 1e-12);
    }

    #[test]
    fn identity_line_through_small_points_prefers_linear_on_ties() {
        // x == y everywhere: several families can be exact; priority favors Linear.
        let points = pts(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
        let selection = fit_and_select(&points, FamilySpec::Auto).unwrap();
        assert_eq!(selection.best.family, ModelFamily::Linear);
        assert_eq!(selection.best.r2, RSquared::Defined(1.0));
    }

    #[test]
    fn non_positive_y_excludes_exponential_and_power_but_still_selects() {
        let points = pts(&[(1.0, -1.0), (2.0, 3.0), (3.0, 7.0)]);
        let selection = fit_and_select(&points, FamilySpec::Auto).unwrap();

        let skipped: Vec<ModelFamily> = selection.skipped.iter().map(|(f, _)| *f).collect();
        assert!(skipped.contains(&ModelFamily::Exponential));
        assert!(skipped.contains(&ModelFamily::Power));
        assert!(!selection.fits.is_empty());
    }

    #[test]
    fn non_positive_x_excludes_logarithmic_and_power() {
        let points = pts(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        let selection = fit_and_select(&points, FamilySpec::Auto).unwrap();

        let skipped: Vec<ModelFamily> = selection.skipped.iter().map(|(f, _)| *f).collect();
        assert!(skipped.contains(&ModelFamily::Logarithmic));
        assert!(skipped.contains(&ModelFamily::Power));
    }

    #[test]
    fn single_point_still_selects_a_model() {
        let points = pts(&[(2.0, 3.0)]);
        let selection = fit_and_select(&points, FamilySpec::Auto).unwrap();
        // Linear degenerates to a horizontal line through the point.
        assert_eq!(selection.best.family, ModelFamily::Linear);
        assert_eq!(selection.curve.len(), 1);
    }

    #[test]
    fn perfect_parabola_beats_linear() {
        let points = pts(&[(1.0, 1.0), (2.0, 4.0), (3.0, 9.0)]);
        let selection = fit_and_select(&points, FamilySpec::Auto).unwrap();

        let quad_r2 = r2_of(&selection, ModelFamily::Quadratic).value().unwrap();
        assert!(quad_r2 > 1.0 - 1e-9);

        let linear_r2 = r2_of(&selection, ModelFamily::Linear).value().unwrap();
        assert!(linear_r2 < 1.0);

        // y = x² is also an exact power law, so either of those two may win on
        // the tie-break; the linear fit must not.
        assert!(matches!(
            selection.best.family,
            ModelFamily::Power | ModelFamily::Quadratic
        ));
    }

    #[test]
    fn all_families_fail_yields_no_viable_model() {
        let points = pts(&[(1.0, f64::NAN)]);
        let err = fit_and_select(&points, FamilySpec::Auto).unwrap_err();
        assert_eq!(err, FitError::NoViableModel);

        let err = fit_and_select(&[], FamilySpec::Auto).unwrap_err();
        assert_eq!(err, FitError::NoViableModel);
    }

    #[test]
    fn selection_is_bit_identical_across_invocations() {
        let points = pts(&[(1.0, 2.3), (2.0, 3.1), (3.0, 5.9), (4.0, 9.2)]);
        let a = fit_and_select(&points, FamilySpec::Auto).unwrap();
        let b = fit_and_select(&points, FamilySpec::Auto).unwrap();

        assert_eq!(a.best.family, b.best.family);
        assert_eq!(a.fits.len(), b.fits.len());
        for (fa, fb) in a.fits.iter().zip(b.fits.iter()) {
            assert_eq!(fa.family, fb.family);
            for (ca, cb) in fa.coeffs.iter().zip(fb.coeffs.iter()) {
                assert_eq!(ca.to_bits(), cb.to_bits());
            }
            match (fa.r2, fb.r2) {
                (RSquared::Defined(va), RSquared::Defined(vb)) => {
                    assert_eq!(va.to_bits(), vb.to_bits());
                }
                (ra, rb) => assert_eq!(ra, rb),
            }
        }
    }

    #[test]
    fn single_family_spec_fits_only_that_family() {
        let points = pts(&[(1.0, 2.0), (2.0, 4.0), (3.0, 8.0)]);
        let selection = fit_and_select(&points, FamilySpec::Exponential).unwrap();
        assert_eq!(selection.fits.len(), 1);
        assert_eq!(selection.best.family, ModelFamily::Exponential);
    }

    #[test]
    fn predicted_curve_is_sorted_and_deduplicated() {
        let points = pts(&[(3.0, 6.0), (1.0, 2.0), (3.0, 6.0), (2.0, 4.0)]);
        let selection = fit_and_select(&points, FamilySpec::Auto).unwrap();
        let xs: Vec<f64> = selection.curve.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn undefined_score_can_win_when_it_is_the_only_candidate() {
        // Zero-variance y where the SVD solve leaves a tiny residual: SS_tot
        // is 0 and SS_res is not, so the lone candidate scores Undefined and
        // must still be selected rather than rejected.
        let points = pts(&[(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)]);
        let selection = fit_and_select(&points, FamilySpec::Quadratic).unwrap();
        assert_eq!(selection.best.family, ModelFamily::Quadratic);
        assert_eq!(selection.best.r2, RSquared::Undefined);
    }

    #[test]
    fn zero_variance_sample_prefers_the_exact_horizontal_fit() {
        // All y identical: linear matches exactly (Defined 1.0); any family
        // that misses scores Undefined and must not win.
        let points = pts(&[(1.0, 4.0), (2.0, 4.0), (3.0, 4.0)]);
        let selection = fit_and_select(&points, FamilySpec::Auto).unwrap();
        assert_eq!(selection.best.family, ModelFamily::Linear);
        assert_eq!(selection.best.r2, RSquared::Defined(1.0));
    }
}
