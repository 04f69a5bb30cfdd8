//! Formatted terminal output.
//!
//! We keep formatting code in one place so the fitting code stays clean and
//! output changes are localized.

use crate::domain::{FitQuality, FittedModel, PredictorKind, Series};

/// Format the run summary (source + fit parameters + diagnostics).
pub fn format_summary(series: &Series, predictor: PredictorKind, model: &FittedModel, quality: &FitQuality) -> String {
    let mut out = String::new();

    out.push_str("=== trendfit - least-squares trend ===\n");
    out.push_str(&format!("Source: {}\n", series.name));
    out.push_str(&format!(
        "Points: n={} | skipped={}\n",
        series.values.len(),
        series.skipped
    ));
    out.push_str(&format!("Predictor: {}\n", predictor.axis_label()));

    if let Some(dates) = &series.dates {
        if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
            out.push_str(&format!("Dates: {first} .. {last}\n"));
        }
    }

    out.push_str("\nFit:\n");
    out.push_str(&format!("  slope     = {:.6}\n", model.slope));
    out.push_str(&format!("  intercept = {:.6}\n", model.intercept));
    out.push_str(&format!("  {model}\n"));

    out.push_str("\nDiagnostics:\n");
    out.push_str(&format!(
        "  sse={:.4} | rmse={:.4} | r2={:.4}\n",
        quality.sse, quality.rmse, quality.r_squared
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_parameters_and_diagnostics() {
        let series = Series {
            name: "prices.csv [open]".to_string(),
            values: vec![1.0, 3.0, 5.0],
            dates: None,
            skipped: 1,
        };
        let model = FittedModel { slope: 2.0, intercept: 1.0 };
        let quality = FitQuality {
            n: 3,
            sse: 0.0,
            rmse: 0.0,
            r_squared: 1.0,
        };

        let txt = format_summary(&series, PredictorKind::Index, &model, &quality);
        assert!(txt.contains("Source: prices.csv [open]"));
        assert!(txt.contains("Points: n=3 | skipped=1"));
        assert!(txt.contains("Predictor: index"));
        assert!(txt.contains("slope     = 2.000000"));
        assert!(txt.contains("intercept = 1.000000"));
        assert!(txt.contains("r2=1.0000"));
        assert!(!txt.contains("Dates:"));
    }
}
