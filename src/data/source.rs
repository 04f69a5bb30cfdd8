//! The data-source seam.
//!
//! A data source yields one ordered series of finite reals. Concrete sources
//! (CSV column, synthetic generator) live in `io::ingest` and `data::sample`.

use crate::domain::{Series, SourceConfig};
use crate::error::DataUnavailable;
use crate::io::ingest::CsvColumnSource;

use super::sample::SyntheticSource;

pub trait DataSource {
    /// Human-readable description used in reports and errors.
    fn name(&self) -> String;

    /// Load the series.
    ///
    /// On success the series is non-empty and every value is finite.
    fn load(&self) -> Result<Series, DataUnavailable>;
}

/// Build the source described by a run configuration.
pub fn source_from_config(config: &SourceConfig) -> Box<dyn DataSource> {
    match config {
        SourceConfig::Csv {
            path,
            column,
            date_column,
        } => Box::new(CsvColumnSource::new(path.clone(), column.clone(), date_column.clone())),
        SourceConfig::Synthetic {
            count,
            seed,
            slope,
            intercept,
            noise,
        } => Box::new(SyntheticSource {
            count: *count,
            seed: *seed,
            slope: *slope,
            intercept: *intercept,
            noise: *noise,
        }),
    }
}
