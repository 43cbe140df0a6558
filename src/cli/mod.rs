//! Command-line parsing for the best-fit law finder.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{FamilySpec, ModelFamily};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lawfit", version, about = "Best-fit elementary law finder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the candidate laws to sample points, print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// An editable x/y point table next to a live chart: add/remove rows, edit
    /// cells, and verify which law best explains the data.
    Tui(FitArgs),
}

/// Common options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Two-column CSV of sample points (`x,y` per line, optional header).
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Inline sample point as `x,y` (repeatable).
    #[arg(short = 'p', long = "point", value_name = "X,Y")]
    pub point: Vec<String>,

    /// Generate a synthetic sample from this family instead of reading input.
    #[arg(long, value_enum, value_name = "FAMILY")]
    pub demo: Option<ModelFamily>,

    /// Number of synthetic points to generate with --demo.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub sample_count: usize,

    /// Random seed for --demo sample generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Noise standard deviation for --demo samples.
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,

    /// Minimum x for --demo samples.
    #[arg(long, default_value_t = 0.0)]
    pub x_min: f64,

    /// Maximum x for --demo samples.
    #[arg(long, default_value_t = 10.0)]
    pub x_max: f64,

    /// Which family to fit (default: fit all five and select the best).
    #[arg(long, value_enum, default_value_t = FamilySpec::Auto)]
    pub model: FamilySpec,

    /// Number of points in the dense display/export grid.
    #[arg(long, default_value_t = 101)]
    pub grid_points: usize,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export curve (family + coefficients + fitted grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `lawfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
