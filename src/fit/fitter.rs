//! The least-squares line fitter.
//!
//! Given aligned predictor/response samples we compute, in closed form,
//! the line minimizing the sum of squared residuals, and apply it to new
//! predictor values.
//!
//! The fitter is a pure computation:
//! - no I/O, no logging, no retries
//! - every failure is returned to the caller as a `FitError`
//! - a fit either yields a complete `FittedModel` or nothing

use crate::domain::{FittedModel, SampleSet};
use crate::error::FitError;
use crate::math::centered_sums;

/// One-shot fitter over a single sample set.
///
/// `fit` consumes the fitter: a fitter is built per sample set, fits once,
/// and is discarded. The resulting `FittedModel` is immutable.
#[derive(Debug, Clone)]
pub struct Fitter {
    samples: SampleSet,
}

impl Fitter {
    pub fn new(samples: SampleSet) -> Self {
        Self { samples }
    }

    pub fn fit(self) -> Result<FittedModel, FitError> {
        fit(&self.samples)
    }
}

/// Fit `y = slope * x + intercept` by ordinary least squares.
pub fn fit(samples: &SampleSet) -> Result<FittedModel, FitError> {
    let n = samples.len();
    if n < 2 {
        return Err(FitError::InsufficientData { got: n });
    }

    if let Some(i) = samples.xs().iter().position(|x| !x.is_finite()) {
        return Err(FitError::InvalidInput(format!("non-finite predictor value at index {i}")));
    }
    if let Some(i) = samples.ys().iter().position(|y| !y.is_finite()) {
        return Err(FitError::InvalidInput(format!("non-finite response value at index {i}")));
    }

    // Identical predictors need not center to an exact zero Sxx (e.g. 0.1 × 3
    // has a mean of 0.10000000000000002), and huge ones overflow the mean.
    let x0 = samples.xs()[0];
    if samples.xs().iter().all(|&x| x == x0) {
        return Err(FitError::DegenerateInput { n });
    }

    let sums = centered_sums(samples.xs(), samples.ys()).ok_or(FitError::InsufficientData { got: n })?;

    if !sums.sxx.is_finite() || !sums.sxy.is_finite() {
        return Err(FitError::InvalidInput("sums overflowed; input magnitude too large".to_string()));
    }
    if sums.sxx == 0.0 {
        return Err(FitError::DegenerateInput { n });
    }

    let slope = sums.sxy / sums.sxx;
    let intercept = sums.y_mean - slope * sums.x_mean;

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(FitError::InvalidInput("fitted parameters are not finite".to_string()));
    }

    Ok(FittedModel { slope, intercept })
}

/// Apply a fitted line to each predictor value, preserving order.
///
/// Values outside the fitted range are extrapolated without any flag.
pub fn predict(model: &FittedModel, xs: &[f64]) -> Result<Vec<f64>, FitError> {
    if let Some(i) = xs.iter().position(|x| !x.is_finite()) {
        return Err(FitError::InvalidInput(format!("non-finite predictor value at index {i}")));
    }
    Ok(xs.iter().map(|&x| model.at(x)).collect())
}
