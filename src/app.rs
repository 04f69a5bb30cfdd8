//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the log subscriber
//! - runs the fit pipeline
//! - prints the summary and hands the scene to a render sink
//! - writes optional exports

use std::io;

use clap::Parser;
use log::{debug, info};
use tracing_subscriber::filter::LevelFilter;

use crate::cli::{Command, FitArgs};
use crate::domain::{ColumnSelector, FitConfig, SourceConfig};
use crate::error::AppError;
use crate::plot::{AsciiSink, RenderSink};
use crate::tui::TerminalSink;

pub mod pipeline;

/// Entry point for the `trendfit` binary.
pub fn run() -> Result<(), AppError> {
    // Environment defaults (TRENDFIT_CSV, ...) may come from a local `.env`.
    let dotenv = dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging(cli.verbose);
    if let Some(path) = dotenv {
        debug!("loaded environment from {}", path.display());
    }

    match cli.command {
        Command::Fit(args) => handle_fit(args, OutputMode::Print),
        Command::Show(args) => handle_fit(args, OutputMode::Interactive),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Print,
    Interactive,
}

fn handle_fit(args: FitArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    if mode == OutputMode::Print {
        println!(
            "{}",
            crate::report::format_summary(&run.series, run.predictor, &run.model, &run.quality)
        );
    }

    let scene = run.scene();
    match mode {
        OutputMode::Print if config.plot => {
            AsciiSink::new(io::stdout().lock(), config.plot_width, config.plot_height).render(&scene);
        }
        OutputMode::Print => {}
        OutputMode::Interactive => TerminalSink.render(&scene),
    }

    if let Some(path) = &config.export_residuals {
        crate::io::export::write_residuals_csv(path, &run.residuals)?;
    }

    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    let source = if args.synthetic {
        if args.csv.is_some() {
            info!("--synthetic given; ignoring CSV input");
        }
        SourceConfig::Synthetic {
            count: args.count,
            seed: args.seed,
            slope: args.true_slope,
            intercept: args.true_intercept,
            noise: args.noise,
        }
    } else {
        let path = args
            .csv
            .clone()
            .ok_or_else(|| AppError::new(2, "No input: pass a CSV path (or set TRENDFIT_CSV) or use --synthetic."))?;
        SourceConfig::Csv {
            path,
            column: ColumnSelector::parse(&args.column),
            date_column: args.date_column.as_deref().map(ColumnSelector::parse),
        }
    };

    let (plot_width, plot_height) = plot_size(args.width, args.height, crossterm::terminal::size().ok());

    Ok(FitConfig {
        source,
        predictor: args.predictor,
        plot: !args.no_plot,
        plot_width,
        plot_height,
        export_residuals: args.export.clone(),
    })
}

const FALLBACK_PLOT_SIZE: (usize, usize) = (100, 25);

/// Rows kept free below a terminal-sized plot for the summary and range header.
const SUMMARY_ROWS: usize = 8;

/// Resolve the ASCII plot size: explicit flags win, then the terminal size,
/// then a fixed fallback when stdout is not a terminal.
fn plot_size(width: Option<usize>, height: Option<usize>, terminal: Option<(u16, u16)>) -> (usize, usize) {
    let (auto_w, auto_h) = match terminal {
        Some((cols, rows)) if cols > 0 && rows > 0 => (
            usize::from(cols).saturating_sub(1).max(10),
            usize::from(rows).saturating_sub(SUMMARY_ROWS).max(5),
        ),
        _ => FALLBACK_PLOT_SIZE,
    };
    (width.unwrap_or(auto_w), height.unwrap_or(auto_h))
}

/// Install a stderr log subscriber; `log` records are bridged into it.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Rewrite argv so `trendfit` defaults to `trendfit fit`.
///
/// Rules:
/// - `trendfit data.csv ...`        -> `trendfit fit data.csv ...`
/// - `trendfit --synthetic ...`     -> `trendfit fit --synthetic ...`
/// - `trendfit --help/--version/-h` -> unchanged (show top-level help/version)
/// - `trendfit`                     -> unchanged (clap reports the missing subcommand)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "show");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "fit".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::PredictorKind;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_csv_defaults_to_fit() {
        assert_eq!(
            rewrite_args(argv(&["trendfit", "data.csv"])),
            argv(&["trendfit", "fit", "data.csv"])
        );
        assert_eq!(
            rewrite_args(argv(&["trendfit", "--synthetic"])),
            argv(&["trendfit", "fit", "--synthetic"])
        );
    }

    #[test]
    fn subcommands_and_help_are_unchanged() {
        for args in [
            argv(&["trendfit", "show", "x.csv"]),
            argv(&["trendfit", "--help"]),
            argv(&["trendfit"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn csv_args_resolve_to_config() {
        let cli = Cli::try_parse_from(["trendfit", "fit", "p.csv", "--date-column", "Date", "--predictor", "date", "--no-plot"])
            .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let config = fit_config_from_args(&args).unwrap();

        assert_eq!(
            config.source,
            SourceConfig::Csv {
                path: "p.csv".into(),
                column: ColumnSelector::Index(1),
                date_column: Some(ColumnSelector::Name("Date".to_string())),
            }
        );
        assert_eq!(config.predictor, PredictorKind::Date);
        assert!(!config.plot);
    }

    #[test]
    fn synthetic_args_resolve_to_config() {
        let cli = Cli::try_parse_from(["trendfit", "fit", "--synthetic", "-n", "10", "--seed", "5"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let config = fit_config_from_args(&args).unwrap();
        assert!(matches!(
            config.source,
            SourceConfig::Synthetic { count: 10, seed: 5, .. }
        ));
    }

    #[test]
    fn plot_size_follows_terminal() {
        assert_eq!(plot_size(None, None, Some((120, 40))), (119, 32));
        // Tiny terminals still get a usable grid.
        assert_eq!(plot_size(None, None, Some((8, 6))), (10, 5));
    }

    #[test]
    fn plot_size_flags_override_terminal() {
        assert_eq!(plot_size(Some(60), None, Some((120, 40))), (60, 32));
        assert_eq!(plot_size(Some(60), Some(12), Some((120, 40))), (60, 12));
    }

    #[test]
    fn plot_size_falls_back_without_terminal() {
        assert_eq!(plot_size(None, None, None), (100, 25));
        assert_eq!(plot_size(None, None, Some((0, 0))), (100, 25));
        assert_eq!(plot_size(None, Some(7), None), (100, 7));
    }
}
