//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fitter's inputs and outputs (`SampleSet`, `FittedModel`, `FitQuality`)
//! - what data sources yield (`Series`) and residual rows (`Residual`)
//! - run configuration (`FitConfig`, `SourceConfig`, `PredictorKind`)

pub mod types;

pub use types::*;
