//! Goodness-of-fit diagnostics.

use crate::domain::{FitQuality, FittedModel, SampleSet};
use crate::math::centered_sums;

impl FitQuality {
    /// Evaluate SSE, RMSE and R² of `model` over `samples`.
    ///
    /// R² is `1 - SSE/SST`. When the response is constant (SST = 0) a perfect
    /// fit reports 1.0 and anything else reports 0.0.
    pub fn evaluate(model: &FittedModel, samples: &SampleSet) -> Self {
        let n = samples.len();
        let Some(sums) = centered_sums(samples.xs(), samples.ys()) else {
            return Self {
                n,
                sse: 0.0,
                rmse: 0.0,
                r_squared: 0.0,
            };
        };

        let sst = sums.syy;
        let sse: f64 = samples
            .iter()
            .map(|(x, y)| {
                let r = y - model.at(x);
                r * r
            })
            .sum();

        let rmse = (sse / n as f64).sqrt();
        let r_squared = if sst > 0.0 {
            1.0 - sse / sst
        } else if sse == 0.0 {
            1.0
        } else {
            0.0
        };

        Self {
            n,
            sse,
            rmse,
            r_squared,
        }
    }
}
