//! Reporting utilities: residuals and formatted terminal output.

use chrono::NaiveDate;

use crate::domain::{Residual, SampleSet};

pub mod format;

pub use format::*;

/// Pair each sample with its fitted value and residual.
///
/// `fitted` holds the predictions over `samples.xs()`, in the same order.
/// `dates`, when given, must be aligned with the samples and labels each row.
pub fn compute_residuals(samples: &SampleSet, fitted: &[f64], dates: Option<&[NaiveDate]>) -> Vec<Residual> {
    samples
        .iter()
        .zip(fitted.iter().copied())
        .enumerate()
        .map(|(i, ((x, y), y_fit))| Residual {
            date: dates.and_then(|d| d.get(i).copied()),
            x,
            y,
            y_fit,
            residual: y - y_fit,
        })
        .collect()
}
