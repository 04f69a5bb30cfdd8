//! Shared fit pipeline used by both the printing and the interactive front-ends.
//!
//! source -> predictor construction -> fit -> predictions -> diagnostics -> residuals
//!
//! The front-ends then only deal with presentation.

use log::{debug, info};

use crate::data::{DataSource, source_from_config};
use crate::domain::{FitConfig, FitQuality, FittedModel, PredictorKind, Residual, SampleSet, Series};
use crate::error::AppError;
use crate::fit::{Fitter, predict};
use crate::plot::Scene;
use crate::report::compute_residuals;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub series: Series,
    pub predictor: PredictorKind,
    pub samples: SampleSet,
    pub model: FittedModel,
    /// Predictions over the same predictor values as the samples.
    pub fitted: Vec<f64>,
    pub quality: FitQuality,
    pub residuals: Vec<Residual>,
}

impl RunOutput {
    /// The scene handed to render sinks.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            title: &self.series.name,
            xs: self.samples.xs(),
            ys: self.samples.ys(),
            fitted: &self.fitted,
            model: &self.model,
            x_label: self.predictor.axis_label(),
            y_label: "value",
        }
    }
}

/// Execute the full pipeline for the configured source.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let source = source_from_config(&config.source);
    run_fit_with_source(source.as_ref(), config.predictor)
}

/// Execute the pipeline against an explicit data source.
pub fn run_fit_with_source(source: &dyn DataSource, predictor: PredictorKind) -> Result<RunOutput, AppError> {
    info!("loading {}", source.name());
    let series = source.load()?;

    let xs = build_predictor(&series, predictor)?;
    let samples = SampleSet::new(xs, series.values.clone())?;
    debug!("fitting {} samples ({:?} predictor)", samples.len(), predictor);

    let model = Fitter::new(samples.clone()).fit()?;
    let fitted = predict(&model, samples.xs())?;
    let quality = FitQuality::evaluate(&model, &samples);
    let residuals = compute_residuals(&samples, &fitted, series.dates.as_deref());

    info!("fitted {model} (r2={:.4})", quality.r_squared);

    Ok(RunOutput {
        series,
        predictor,
        samples,
        model,
        fitted,
        quality,
        residuals,
    })
}

/// Build the predictor sequence for a loaded series.
pub fn build_predictor(series: &Series, kind: PredictorKind) -> Result<Vec<f64>, AppError> {
    match kind {
        PredictorKind::Index => Ok((0..series.values.len()).map(|i| i as f64).collect()),
        PredictorKind::Date => {
            let dates = series.dates.as_ref().ok_or_else(|| {
                AppError::new(2, "`--predictor date` requires a date column (`--date-column`).")
            })?;
            let Some(&first) = dates.first() else {
                return Ok(Vec::new());
            };
            Ok(dates.iter().map(|d| (*d - first).num_days() as f64).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SyntheticSource;
    use crate::error::DataUnavailable;
    use chrono::NaiveDate;

    struct FixedSource(Vec<f64>);

    impl DataSource for FixedSource {
        fn name(&self) -> String {
            "fixed".to_string()
        }

        fn load(&self) -> Result<Series, DataUnavailable> {
            Ok(Series {
                name: self.name(),
                values: self.0.clone(),
                dates: None,
                skipped: 0,
            })
        }
    }

    struct BrokenSource;

    impl DataSource for BrokenSource {
        fn name(&self) -> String {
            "broken".to_string()
        }

        fn load(&self) -> Result<Series, DataUnavailable> {
            Err(DataUnavailable::new("broken", "disk on fire"))
        }
    }

    #[test]
    fn index_predictor_recovers_exact_line() {
        let ys: Vec<f64> = (0..20).map(|i| 3.0 * i as f64 + 2.0).collect();
        let run = run_fit_with_source(&FixedSource(ys), PredictorKind::Index).unwrap();
        assert!((run.model.slope - 3.0).abs() < 1e-9);
        assert!((run.model.intercept - 2.0).abs() < 1e-9);
        assert_eq!(run.fitted.len(), 20);
        assert_eq!(run.residuals.len(), 20);
        for (row, &y_fit) in run.residuals.iter().zip(&run.fitted) {
            assert_eq!(row.y_fit, y_fit);
            assert!(row.residual.abs() < 1e-9);
        }
        assert!((run.quality.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn synthetic_source_fits_near_true_line() {
        let src = SyntheticSource {
            count: 500,
            seed: 3,
            slope: 0.25,
            intercept: -4.0,
            noise: 0.5,
        };
        let run = run_fit_with_source(&src, PredictorKind::Index).unwrap();
        assert!((run.model.slope - 0.25).abs() < 0.01);
        assert!((run.model.intercept + 4.0).abs() < 0.5);
    }

    #[test]
    fn single_value_is_insufficient() {
        let err = run_fit_with_source(&FixedSource(vec![1.0]), PredictorKind::Index).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn source_failure_surfaces_unchanged() {
        let err = run_fit_with_source(&BrokenSource, PredictorKind::Index).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn date_predictor_counts_days() {
        let d = |day| NaiveDate::from_ymd_opt(2018, 2, day).unwrap();
        let series = Series {
            name: "s".to_string(),
            values: vec![1.0, 2.0, 3.0],
            dates: Some(vec![d(7), d(8), d(12)]),
            skipped: 0,
        };
        assert_eq!(build_predictor(&series, PredictorKind::Date).unwrap(), vec![0.0, 1.0, 5.0]);
        assert_eq!(build_predictor(&series, PredictorKind::Index).unwrap(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn date_predictor_without_dates_is_config_error() {
        let series = Series {
            name: "s".to_string(),
            values: vec![1.0, 2.0],
            dates: None,
            skipped: 0,
        };
        let err = build_predictor(&series, PredictorKind::Date).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn same_dates_are_degenerate() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let series = Series {
            name: "s".to_string(),
            values: vec![1.0, 2.0],
            dates: Some(vec![d, d]),
            skipped: 0,
        };
        let xs = build_predictor(&series, PredictorKind::Date).unwrap();
        let samples = SampleSet::new(xs, series.values).unwrap();
        assert!(Fitter::new(samples).fit().is_err());
    }
}
