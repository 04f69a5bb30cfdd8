//! Export per-sample residuals to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Columns: `date,x,y,y_fit,residual` (`date` is empty when the source has none).

use std::path::Path;

use log::info;

use crate::domain::Residual;
use crate::error::AppError;

/// Write residual rows to a CSV file.
pub fn write_residuals_csv(path: &Path, residuals: &[Residual]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for r in residuals {
        writer
            .serialize(r)
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;

    info!("wrote {} residual rows to {}", residuals.len(), path.display());
    Ok(())
}
