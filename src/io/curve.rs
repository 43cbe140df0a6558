//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted model:
//! - family + coefficients + equation string + R²
//! - a precomputed dense grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveFile, CurveGrid, FittedModel, SamplePoint};
use crate::error::AppError;
use crate::fit::fitted_grid;

/// Write a curve JSON file.
pub fn write_curve_json(
    path: &Path,
    best: &FittedModel,
    points: &[SamplePoint],
    grid_points: usize,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    let (x_min, x_max) = grid_range(best, points);
    let grid = fitted_grid(best, x_min, x_max, grid_points);

    let curve = CurveFile {
        tool: "lawfit".to_string(),
        model: best.clone(),
        n_points: points.len(),
        grid: CurveGrid {
            x: grid.iter().map(|p| p.x).collect(),
            y: grid.iter().map(|p| p.y).collect(),
        },
    };

    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

/// Dense-grid x range for display.
///
/// Normally the observed x span; widened a little when the sample has no
/// spread, and clamped to stay inside a positive-x family's domain.
pub fn grid_range(fit: &FittedModel, points: &[SamplePoint]) -> (f64, f64) {
    let mut x0 = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    for p in points {
        x0 = x0.min(p.x);
        x1 = x1.max(p.x);
    }
    if !(x0.is_finite() && x1.is_finite()) {
        return (0.0, 1.0);
    }
    if (x1 - x0).abs() < 1e-9 {
        x0 -= 0.5;
        x1 += 0.5;
    }
    if fit.family.requires_positive_x() && x0 <= 0.0 {
        x0 = (x1 / 100.0).min(0.1);
    }
    (x0, x1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelFamily, RSquared};

    fn linear_fit() -> FittedModel {
        FittedModel {
            family: ModelFamily::Linear,
            display_name: "Linear".to_string(),
            coeffs: vec![2.0, 0.0],
            equation: "y = 2x + 0".to_string(),
            r2: RSquared::Defined(1.0),
        }
    }

    #[test]
    fn grid_range_spans_observed_x() {
        let points = vec![SamplePoint::new(1.0, 2.0), SamplePoint::new(5.0, 10.0)];
        let (x0, x1) = grid_range(&linear_fit(), &points);
        assert_eq!(x0, 1.0);
        assert_eq!(x1, 5.0);
    }

    #[test]
    fn grid_range_widens_degenerate_span() {
        let points = vec![SamplePoint::new(2.0, 3.0)];
        let (x0, x1) = grid_range(&linear_fit(), &points);
        assert!(x1 > x0);
    }

    #[test]
    fn grid_range_respects_positive_x_domain() {
        let fit = FittedModel {
            family: ModelFamily::Logarithmic,
            display_name: "Logarithmic".to_string(),
            coeffs: vec![1.0, 0.0],
            equation: "y = 1ln(x) + 0".to_string(),
            r2: RSquared::Defined(1.0),
        };
        // An observed minimum of exactly 0 would put ln(x) out of domain.
        let points = vec![SamplePoint::new(0.0, 1.0), SamplePoint::new(4.0, 2.0)];
        let (x0, x1) = grid_range(&fit, &points);
        assert!(x0 > 0.0);
        assert_eq!(x1, 4.0);
    }
}
