//! Input/output helpers.
//!
//! - CSV column ingest (`ingest`)
//! - residual export to CSV (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
