//! Rendering sinks.
//!
//! A sink receives the raw sample points and the fitted predictions over the
//! same predictor values, and displays them as a scatter plot with an overlaid
//! line. Rendering is fire-and-forget: sinks report their own failures through
//! the log and never return errors to the pipeline.

use crate::domain::FittedModel;

pub mod ascii;

pub use ascii::{AsciiSink, render_ascii_plot};

/// Everything a sink needs to draw one fit.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub title: &'a str,
    /// Predictor values of the observed samples.
    pub xs: &'a [f64],
    /// Observed responses, aligned with `xs`.
    pub ys: &'a [f64],
    /// Fitted responses, aligned with `xs`.
    pub fitted: &'a [f64],
    pub model: &'a FittedModel,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl Scene<'_> {
    /// Observed points as `(x, y)` pairs.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.xs.iter().copied().zip(self.ys.iter().copied()).collect()
    }

    /// Fitted points as `(x, y_fit)` pairs, ordered by x so they draw as a line.
    pub fn line(&self) -> Vec<(f64, f64)> {
        let mut line: Vec<(f64, f64)> = self.xs.iter().copied().zip(self.fitted.iter().copied()).collect();
        line.sort_by(|a, b| a.0.total_cmp(&b.0));
        line
    }

    /// `(min, max)` of the predictor, widened when degenerate.
    pub fn x_bounds(&self) -> (f64, f64) {
        widen(min_max(self.xs.iter().copied()).unwrap_or((0.0, 1.0)))
    }

    /// `(min, max)` over observed and fitted responses, padded by 5%.
    pub fn y_bounds(&self) -> (f64, f64) {
        let (lo, hi) = widen(min_max(self.ys.iter().chain(self.fitted).copied()).unwrap_or((0.0, 1.0)));
        pad_range(lo, hi, 0.05)
    }
}

/// A display target for a fitted scene.
pub trait RenderSink {
    fn render(&mut self, scene: &Scene<'_>);
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}
