//! Shared "fit pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! gather points -> fit all families -> selection -> residuals
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::generate_sample;
use crate::domain::{FitConfig, PointResidual, SamplePoint};
use crate::error::AppError;
use crate::fit::{fit_and_select, FitSelection};

/// All computed outputs of a single verify run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub points: Vec<SamplePoint>,
    pub selection: FitSelection,
    pub residuals: Vec<PointResidual>,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let points = gather_points(config)?;
    run_fit_with_points(config, points)
}

/// Execute the fitting pipeline on already-gathered points.
///
/// This is what the TUI calls on "verify": its point table is the source.
pub fn run_fit_with_points(
    config: &FitConfig,
    points: Vec<SamplePoint>,
) -> Result<RunOutput, AppError> {
    let selection = fit_and_select(&points, config.family_spec)?;
    let residuals = crate::report::compute_residuals(&points, &selection.best)?;

    Ok(RunOutput {
        points,
        selection,
        residuals,
    })
}

/// Resolve the configured point source.
///
/// Precedence: inline `--point` flags, then `--input` CSV, then `--demo`
/// generation. Mixing sources is rejected so a typo can't silently fit the
/// wrong data.
pub fn gather_points(config: &FitConfig) -> Result<Vec<SamplePoint>, AppError> {
    let sources = [
        !config.inline_points.is_empty(),
        config.input.is_some(),
        config.demo.is_some(),
    ]
    .iter()
    .filter(|&&s| s)
    .count();
    if sources > 1 {
        return Err(AppError::new(
            2,
            "Choose one point source: --point, --input, or --demo.",
        ));
    }

    if !config.inline_points.is_empty() {
        return Ok(config.inline_points.clone());
    }
    if let Some(path) = &config.input {
        return crate::io::points::read_points_csv(path);
    }
    if let Some(family) = config.demo {
        return Ok(generate_sample(family, config)?.points);
    }

    Err(AppError::new(
        2,
        "No sample points given. Use --point, --input, or --demo (see --help).",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FamilySpec, ModelFamily};

    fn base_config() -> FitConfig {
        FitConfig {
            input: None,
            inline_points: Vec::new(),
            demo: None,
            sample_count: 20,
            sample_seed: 42,
            noise_sigma: 0.0,
            x_min: 0.0,
            x_max: 10.0,
            family_spec: FamilySpec::Auto,
            grid_points: 101,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_results: None,
            export_curve: None,
        }
    }

    #[test]
    fn inline_points_flow_through_the_pipeline() {
        let mut config = base_config();
        config.inline_points = vec![
            SamplePoint::new(1.0, 2.0),
            SamplePoint::new(2.0, 4.0),
            SamplePoint::new(3.0, 6.0),
        ];
        let run = run_fit(&config).unwrap();
        assert_eq!(run.selection.best.family, ModelFamily::Linear);
        assert_eq!(run.residuals.len(), 3);
    }

    #[test]
    fn noiseless_demo_recovers_its_own_family() {
        let mut config = base_config();
        config.demo = Some(ModelFamily::Exponential);
        let run = run_fit(&config).unwrap();
        assert_eq!(run.selection.best.family, ModelFamily::Exponential);
    }

    #[test]
    fn missing_and_conflicting_sources_are_usage_errors() {
        let config = base_config();
        let err = run_fit(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let mut config = base_config();
        config.demo = Some(ModelFamily::Linear);
        config.inline_points = vec![SamplePoint::new(1.0, 1.0)];
        let err = run_fit(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
