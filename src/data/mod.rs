//! Data sources: the `DataSource` seam and the synthetic generator.

pub mod sample;
pub mod source;

pub use sample::SyntheticSource;
pub use source::{DataSource, source_from_config};
