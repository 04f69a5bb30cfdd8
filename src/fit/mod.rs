//! Line fitting.
//!
//! - `fitter`: closed-form OLS fit and prediction
//! - `quality`: SSE / RMSE / R² diagnostics

pub mod fitter;
pub mod quality;

pub use fitter::{Fitter, fit, predict};
