//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::cmp::Ordering;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single observed (x, y) pair.
///
/// Order within a sample set is irrelevant to fitting but preserved for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The five candidate model families.
///
/// The declaration order is also the tie-break priority order: when two fits
/// score exactly equal R², the earlier family wins ("prefer the simplest
/// explanation"). Keep the variants in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Linear,
    Exponential,
    Logarithmic,
    Power,
    Quadratic,
}

impl ModelFamily {
    /// All families in tie-break priority order.
    pub const ALL: [ModelFamily; 5] = [
        ModelFamily::Linear,
        ModelFamily::Exponential,
        ModelFamily::Logarithmic,
        ModelFamily::Power,
        ModelFamily::Quadratic,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelFamily::Linear => "Linear",
            ModelFamily::Exponential => "Exponential",
            ModelFamily::Logarithmic => "Logarithmic",
            ModelFamily::Power => "Power",
            ModelFamily::Quadratic => "Quadratic",
        }
    }

    /// Number of coefficients for this family.
    pub fn coeff_len(self) -> usize {
        match self {
            ModelFamily::Linear => 2,
            ModelFamily::Exponential => 2,
            ModelFamily::Logarithmic => 2,
            ModelFamily::Power => 2,
            ModelFamily::Quadratic => 3,
        }
    }

    /// Whether the family's domain requires strictly positive x values.
    pub fn requires_positive_x(self) -> bool {
        matches!(self, ModelFamily::Logarithmic | ModelFamily::Power)
    }

    /// Whether the family's domain requires strictly positive y values.
    pub fn requires_positive_y(self) -> bool {
        matches!(self, ModelFamily::Exponential | ModelFamily::Power)
    }
}

/// Coefficient of determination as an explicit tri-state.
///
/// `Undefined` covers the zero-variance sample set with nonzero residuals.
/// It is a distinct marker rather than NaN because NaN comparisons are
/// unordered and would silently corrupt the selector's tie-break logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RSquared {
    Defined(f64),
    Undefined,
}

impl RSquared {
    /// The numeric value, if defined.
    pub fn value(self) -> Option<f64> {
        match self {
            RSquared::Defined(v) => Some(v),
            RSquared::Undefined => None,
        }
    }

    /// Total order used by the selector: `Undefined` ranks below every
    /// `Defined` value. Defined values are finite by construction (the fitters
    /// reject non-finite scores), so `partial_cmp` cannot fail here.
    pub fn ranking_cmp(self, other: RSquared) -> Ordering {
        match (self, other) {
            (RSquared::Defined(a), RSquared::Defined(b)) => {
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            (RSquared::Defined(_), RSquared::Undefined) => Ordering::Greater,
            (RSquared::Undefined, RSquared::Defined(_)) => Ordering::Less,
            (RSquared::Undefined, RSquared::Undefined) => Ordering::Equal,
        }
    }
}

impl std::fmt::Display for RSquared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RSquared::Defined(v) => write!(f, "{v:.6}"),
            RSquared::Undefined => write!(f, "undefined"),
        }
    }
}

/// The result of fitting one family to a sample set.
///
/// `coeffs` are the unrounded coefficients used by the evaluator; the equation
/// string renders them at 4 significant digits for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedModel {
    pub family: ModelFamily,
    pub display_name: String,
    pub coeffs: Vec<f64>,
    pub equation: String,
    pub r2: RSquared,
}

/// A per-point fitted value (used for reporting and exports).
#[derive(Debug, Clone)]
pub struct PointResidual {
    pub point: SamplePoint,
    pub y_fit: f64,
    pub residual: f64,
}

/// Which family (or families) to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FamilySpec {
    /// Fit all five families and select the best.
    Auto,
    Linear,
    Exponential,
    Logarithmic,
    Power,
    Quadratic,
}

impl FamilySpec {
    /// The families this spec asks the selector to attempt, in priority order.
    pub fn families(self) -> Vec<ModelFamily> {
        match self {
            FamilySpec::Auto => ModelFamily::ALL.to_vec(),
            FamilySpec::Linear => vec![ModelFamily::Linear],
            FamilySpec::Exponential => vec![ModelFamily::Exponential],
            FamilySpec::Logarithmic => vec![ModelFamily::Logarithmic],
            FamilySpec::Power => vec![ModelFamily::Power],
            FamilySpec::Quadratic => vec![ModelFamily::Quadratic],
        }
    }
}

impl std::fmt::Display for FamilySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FamilySpec::Auto => "auto",
            FamilySpec::Linear => "linear",
            FamilySpec::Exponential => "exponential",
            FamilySpec::Logarithmic => "logarithmic",
            FamilySpec::Power => "power",
            FamilySpec::Quadratic => "quadratic",
        };
        f.write_str(name)
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Two-column CSV of sample points.
    pub input: Option<PathBuf>,
    /// Inline points parsed from repeated `--point x,y` flags.
    pub inline_points: Vec<SamplePoint>,

    /// Generate a synthetic sample from this family instead of reading input.
    pub demo: Option<ModelFamily>,
    pub sample_count: usize,
    pub sample_seed: u64,
    /// Noise standard deviation for demo samples.
    pub noise_sigma: f64,
    pub x_min: f64,
    pub x_max: f64,

    pub family_spec: FamilySpec,

    /// Number of points in the dense display/export grid.
    pub grid_points: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub model: FittedModel,
    pub n_points: usize,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
