//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - gathers sample points (CSV, inline flags, or demo generation)
//! - runs curve fitting + model selection
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs};
use crate::domain::FitConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `lawfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `lawfit` to behave like `lawfit tui`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.points, &run.selection)
    );
    println!("{}", crate::report::format_residual_table(&run.residuals));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.points,
            &run.selection.best,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.residuals, &run.selection.best)?;
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_curve_json(
            path,
            &run.selection.best,
            &run.points,
            config.grid_points,
        )?;
    }

    Ok(())
}

fn handle_tui(args: FitArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;

    println!("{} | {} | R² = {}", curve.model.display_name, curve.model.equation, curve.model.r2);
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    let inline_points = crate::io::points::parse_inline_points(&args.point)?;
    Ok(FitConfig {
        input: args.input.clone(),
        inline_points,
        demo: args.demo,
        sample_count: args.sample_count,
        sample_seed: args.seed,
        noise_sigma: args.noise,
        x_min: args.x_min,
        x_max: args.x_max,
        family_spec: args.model,
        grid_points: args.grid_points,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
    })
}

/// Rewrite argv so `lawfit` defaults to `lawfit tui`.
///
/// Rules:
/// - `lawfit`                      -> `lawfit tui`
/// - `lawfit -p 1,2 ...`           -> `lawfit tui -p 1,2 ...`
/// - `lawfit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_rewrites_to_tui() {
        assert_eq!(rewrite_args(strings(&["lawfit"])), strings(&["lawfit", "tui"]));
        assert_eq!(
            rewrite_args(strings(&["lawfit", "--demo", "linear"])),
            strings(&["lawfit", "tui", "--demo", "linear"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(
            rewrite_args(strings(&["lawfit", "fit", "-i", "pts.csv"])),
            strings(&["lawfit", "fit", "-i", "pts.csv"])
        );
        assert_eq!(rewrite_args(strings(&["lawfit", "--help"])), strings(&["lawfit", "--help"]));
    }
}
