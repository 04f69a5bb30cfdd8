//! Error types.
//!
//! - `FitError`: failures of the least-squares core (fit / predict)
//! - `DataUnavailable`: a data source could not produce a series
//! - `AppError`: process-level error carrying an exit code

use thiserror::Error;

/// Failures of the fitting core.
///
/// Every variant is surfaced to the immediate caller; the core performs no
/// recovery and never retains partial state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Fewer than two samples were supplied.
    #[error("insufficient data: need at least 2 samples, got {got}")]
    InsufficientData { got: usize },

    /// All predictor values are identical, so the slope is undefined.
    #[error("degenerate input: predictor has zero variance across {n} samples")]
    DegenerateInput { n: usize },

    /// Non-finite or otherwise malformed numeric input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// A data source failed to produce a series.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("data unavailable from {source_name}: {reason}")]
pub struct DataUnavailable {
    pub source_name: String,
    pub reason: String,
}

impl DataUnavailable {
    pub fn new(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(3, format!("Fit failed: {err}"))
    }
}

impl From<DataUnavailable> for AppError {
    fn from(err: DataUnavailable) -> Self {
        AppError::new(2, err.to_string())
    }
}
