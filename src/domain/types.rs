//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - passed explicitly between data sources, the fitter and render sinks
//! - exported to CSV (residual rows)
//! - shared read-only across threads (`FittedModel` is `Copy`)

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use crate::error::FitError;

/// What the predictor (x) represents for a loaded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PredictorKind {
    /// `x_i = i` for `i in 0..n`.
    Index,
    /// `x_i` = days elapsed since the first row's date.
    ///
    /// Requires the source to carry a date column.
    Date,
}

impl PredictorKind {
    pub fn axis_label(self) -> &'static str {
        match self {
            PredictorKind::Index => "index",
            PredictorKind::Date => "days",
        }
    }
}

/// An ordered sequence of values produced by a data source.
#[derive(Debug, Clone)]
pub struct Series {
    /// Display name (column header or generator description).
    pub name: String,
    pub values: Vec<f64>,
    /// Per-value dates, when the source has a date column.
    pub dates: Option<Vec<NaiveDate>>,
    /// Rows the source skipped (e.g. unparseable CSV cells).
    pub skipped: usize,
}

/// Aligned predictor/response sequences.
///
/// Construction only checks alignment; the numeric preconditions of a fit
/// (length ≥ 2, finite values, non-zero predictor variance) are checked by the
/// fitter so that each failure surfaces as its own `FitError`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampleSet {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, FitError> {
        if xs.len() != ys.len() {
            return Err(FitError::InvalidInput(format!(
                "predictor and response lengths differ ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }
        Ok(Self { xs, ys })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let (xs, ys) = pairs.iter().copied().unzip();
        Self { xs, ys }
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FittedModel {
    pub slope: f64,
    pub intercept: f64,
}

impl FittedModel {
    /// Evaluate the line at a single point (no input validation).
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl std::fmt::Display for FittedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.intercept < 0.0 { '-' } else { '+' };
        write!(f, "y = {:.6}·x {sign} {:.6}", self.slope, self.intercept.abs())
    }
}

/// Goodness-of-fit diagnostics for a fitted model over its sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitQuality {
    pub n: usize,
    pub sse: f64,
    pub rmse: f64,
    pub r_squared: f64,
}

/// One observed sample with its fitted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Residual {
    pub date: Option<NaiveDate>,
    pub x: f64,
    pub y: f64,
    pub y_fit: f64,
    pub residual: f64,
}

/// Where the response series comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Csv {
        path: PathBuf,
        column: ColumnSelector,
        date_column: Option<ColumnSelector>,
    },
    Synthetic {
        count: usize,
        seed: u64,
        slope: f64,
        intercept: f64,
        noise: f64,
    },
}

/// How a CSV column is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// 0-based position.
    Index(usize),
    /// Header name (case-insensitive).
    Name(String),
}

impl ColumnSelector {
    /// A purely numeric token selects by position, anything else by name.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token.parse::<usize>() {
            Ok(idx) => ColumnSelector::Index(idx),
            Err(_) => ColumnSelector::Name(token.to_string()),
        }
    }
}

impl std::fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnSelector::Index(idx) => write!(f, "#{idx}"),
            ColumnSelector::Name(name) => write!(f, "`{name}`"),
        }
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub source: SourceConfig,
    pub predictor: PredictorKind,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_residuals: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_rejects_mismatched_lengths() {
        let err = SampleSet::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, FitError::InvalidInput(_)));
    }

    #[test]
    fn column_selector_parses_index_or_name() {
        assert_eq!(ColumnSelector::parse("1"), ColumnSelector::Index(1));
        assert_eq!(ColumnSelector::parse(" Close "), ColumnSelector::Name("Close".to_string()));
    }

    #[test]
    fn model_display_shows_signed_intercept() {
        let m = FittedModel { slope: 2.0, intercept: -1.5 };
        assert_eq!(m.to_string(), "y = 2.000000·x - 1.500000");
    }
}
