//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FittedModel, PointResidual};
use crate::error::AppError;

/// Write per-point fitted values and residuals to a CSV file.
pub fn write_results_csv(
    path: &Path,
    residuals: &[PointResidual],
    best: &FittedModel,
) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "x,y_obs,y_fit,residual,family,equation")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let family = best.display_name.to_lowercase();
    for r in residuals {
        writeln!(
            file,
            "{:.10},{:.10},{:.10},{:.10},{},\"{}\"",
            r.point.x, r.point.y, r.y_fit, r.residual, family, best.equation,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
