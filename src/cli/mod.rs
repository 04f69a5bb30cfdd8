//! Command-line parsing for the trend fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting and rendering code. Arguments resolve to a `FitConfig` in `app`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::PredictorKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "trendfit", version, about = "Least-squares trend line for one column of numeric data")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a line, print the summary, and optionally plot/export.
    Fit(FitArgs),
    /// Fit a line and display it in an interactive terminal chart.
    Show(FitArgs),
}

/// Options shared by `fit` and `show`.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// CSV file with a header row.
    #[arg(value_name = "CSV", env = "TRENDFIT_CSV", required_unless_present = "synthetic")]
    pub csv: Option<PathBuf>,

    /// Response column: 0-based position or header name.
    #[arg(short, long, env = "TRENDFIT_COLUMN", default_value = "1")]
    pub column: String,

    /// Date column (position or name); required for `--predictor date`.
    #[arg(long, env = "TRENDFIT_DATE_COLUMN")]
    pub date_column: Option<String>,

    /// What the predictor represents.
    #[arg(long, value_enum, default_value_t = PredictorKind::Index)]
    pub predictor: PredictorKind,

    /// Use a seeded synthetic series instead of a CSV file (takes precedence over CSV).
    #[arg(long)]
    pub synthetic: bool,

    /// Number of synthetic values.
    #[arg(short = 'n', long, default_value_t = 250)]
    pub count: usize,

    /// Random seed for the synthetic series.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Slope of the synthetic series.
    #[arg(long, default_value_t = 0.05, allow_hyphen_values = true)]
    pub true_slope: f64,

    /// Intercept of the synthetic series.
    #[arg(long, default_value_t = 20.0, allow_hyphen_values = true)]
    pub true_intercept: f64,

    /// Noise standard deviation of the synthetic series.
    #[arg(long, default_value_t = 2.0)]
    pub noise: f64,

    /// Disable the ASCII plot (`fit` only).
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns). Defaults to the terminal width.
    #[arg(long)]
    pub width: Option<usize>,

    /// Plot height (rows). Defaults to the terminal height.
    #[arg(long)]
    pub height: Option<usize>,

    /// Export per-sample residuals to CSV.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fit_with_csv() {
        let cli = Cli::try_parse_from(["trendfit", "fit", "prices.csv", "--column", "close"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.csv, Some(PathBuf::from("prices.csv")));
        assert_eq!(args.column, "close");
        assert_eq!(args.predictor, PredictorKind::Index);
        assert!(!args.synthetic);
    }

    #[test]
    fn csv_is_required_without_synthetic() {
        if std::env::var_os("TRENDFIT_CSV").is_none() {
            assert!(Cli::try_parse_from(["trendfit", "fit"]).is_err());
        }
        assert!(Cli::try_parse_from(["trendfit", "fit", "--synthetic"]).is_ok());
    }

    #[test]
    fn negative_synthetic_slope_is_accepted() {
        let cli = Cli::try_parse_from(["trendfit", "show", "--synthetic", "--true-slope", "-0.5", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.true_slope, -0.5);
    }
}
