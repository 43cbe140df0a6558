//! Synthetic sample generation from a known law.
//!
//! `--demo <family>` produces a seeded, reproducible sample so the tool can be
//! exercised without a data file: pick ground-truth coefficients for the
//! family, evaluate them on evenly spread x values, and add Gaussian noise.
//!
//! Families with a positive-y domain get multiplicative noise (`y·e^(σz)`)
//! instead of additive noise so the generated sample never violates the
//! family's own preconditions.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{FitConfig, ModelFamily, SamplePoint};
use crate::error::AppError;
use crate::models::predict;

#[derive(Debug, Clone)]
pub struct SampleData {
    pub points: Vec<SamplePoint>,
    pub family: ModelFamily,
    pub true_coeffs: Vec<f64>,
}

/// Ground-truth coefficients used for demo samples.
pub fn demo_coeffs(family: ModelFamily) -> Vec<f64> {
    match family {
        ModelFamily::Linear => vec![2.0, 1.0],
        ModelFamily::Exponential => vec![1.5, 0.4],
        ModelFamily::Logarithmic => vec![3.0, 2.0],
        ModelFamily::Power => vec![2.0, 1.5],
        ModelFamily::Quadratic => vec![1.0, -2.0, 3.0],
    }
}

pub fn generate_sample(family: ModelFamily, config: &FitConfig) -> Result<SampleData, AppError> {
    if config.sample_count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    let (x_min, x_max) = demo_x_range(family, config)?;

    let mut rng = StdRng::seed_from_u64(config.sample_seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let sigma = config.noise_sigma.max(0.0);
    let true_coeffs = demo_coeffs(family);
    let multiplicative = family.requires_positive_y();

    let n = config.sample_count;
    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let u = if n == 1 { 0.5 } else { i as f64 / (n as f64 - 1.0) };
        let x = x_min + u * (x_max - x_min);
        let y_true = predict(family, x, &true_coeffs);

        let z = normal.sample(&mut rng);
        let y = if multiplicative {
            y_true * (sigma * z).exp()
        } else {
            y_true + sigma * z
        };
        points.push(SamplePoint::new(x, y));
    }

    Ok(SampleData {
        points,
        family,
        true_coeffs,
    })
}

fn demo_x_range(family: ModelFamily, config: &FitConfig) -> Result<(f64, f64), AppError> {
    let mut x_min = config.x_min;
    let x_max = config.x_max;
    if !(x_min.is_finite() && x_max.is_finite() && x_max > x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    // Keep demo samples inside the family's own domain. A fully non-positive
    // range cannot be clamped into it.
    if family.requires_positive_x() && x_min <= 0.0 {
        x_min = (x_max / 100.0).min(0.1);
        if x_max <= x_min {
            return Err(AppError::new(
                2,
                format!("{} demo samples need x > 0.", family.display_name()),
            ));
        }
    }
    Ok((x_min, x_max))
}
