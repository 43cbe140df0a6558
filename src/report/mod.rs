//! Reporting utilities: residuals and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{FittedModel, PointResidual, SamplePoint};
use crate::error::AppError;
use crate::fit::FitSelection;
use crate::models::predict;

/// Compute fitted values and residuals for each sample point.
pub fn compute_residuals(
    points: &[SamplePoint],
    best: &FittedModel,
) -> Result<Vec<PointResidual>, AppError> {
    let mut out = Vec::with_capacity(points.len());
    for p in points {
        let y_fit = predict(best.family, p.x, &best.coeffs);
        if !y_fit.is_finite() {
            return Err(AppError::new(
                4,
                "Non-finite model prediction during residual computation.",
            ));
        }
        out.push(PointResidual {
            point: *p,
            y_fit,
            residual: p.y - y_fit,
        });
    }
    Ok(out)
}

/// Format the full run summary (sample stats + per-family diagnostics + winner).
pub fn format_run_summary(points: &[SamplePoint], selection: &FitSelection) -> String {
    let mut out = String::new();

    out.push_str("=== lawfit - best-fit law finder ===\n");
    let (x_min, x_max) = min_max(points.iter().map(|p| p.x));
    let (y_min, y_max) = min_max(points.iter().map(|p| p.y));
    out.push_str(&format!(
        "Points: n={} | x=[{x_min:.4}, {x_max:.4}] | y=[{y_min:.4}, {y_max:.4}]\n",
        points.len()
    ));

    out.push_str("\nModel diagnostics:\n");
    for fit in &selection.fits {
        let chosen = if fit.family == selection.best.family { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:<12} R²={}  {}\n",
            fit.display_name, fit.r2, fit.equation
        ));
    }
    for (family, reason) in &selection.skipped {
        out.push_str(&format!("  (skipped {}) {reason}\n", family.display_name()));
    }

    out.push_str("\nChosen model:\n");
    out.push_str(&format!("- {}\n", selection.best.display_name));
    out.push_str(&format!("- {}\n", selection.best.equation));
    out.push_str(&format!("- R² = {}\n", selection.best.r2));
    out.push_str(&format!("- coefficients: {}\n", fmt_vec(&selection.best.coeffs)));
    out.push('\n');

    out
}

/// Format the per-point residual table (the sample sets are small).
pub fn format_residual_table(residuals: &[PointResidual]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>12} {:>12} {:>12} {:>12}\n",
        "x", "y_obs", "y_fit", "residual"
    ));
    for r in residuals {
        out.push_str(&format!(
            "{:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
            r.point.x, r.point.y, r.y_fit, r.residual
        ));
    }
    out
}

fn fmt_vec(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    format!("[{}]", items.join(", "))
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}
