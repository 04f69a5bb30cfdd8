//! Synthetic series generation.
//!
//! Produces `y_i = slope * i + intercept + ε_i` with `ε_i ~ N(0, noise)`.
//! The generator is seeded, so the same settings always yield the same series.

use log::debug;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Series;
use crate::error::DataUnavailable;

use super::source::DataSource;

#[derive(Debug, Clone)]
pub struct SyntheticSource {
    pub count: usize,
    pub seed: u64,
    pub slope: f64,
    pub intercept: f64,
    /// Standard deviation of the additive Gaussian noise.
    pub noise: f64,
}

impl DataSource for SyntheticSource {
    fn name(&self) -> String {
        format!(
            "synthetic(n={}, slope={}, intercept={}, noise={}, seed={})",
            self.count, self.slope, self.intercept, self.noise, self.seed
        )
    }

    fn load(&self) -> Result<Series, DataUnavailable> {
        if self.count == 0 {
            return Err(DataUnavailable::new(self.name(), "sample count must be > 0"));
        }
        if !(self.slope.is_finite() && self.intercept.is_finite()) {
            return Err(DataUnavailable::new(self.name(), "slope and intercept must be finite"));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(DataUnavailable::new(self.name(), "noise must be finite and >= 0"));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let normal = Normal::new(0.0, self.noise)
            .map_err(|e| DataUnavailable::new(self.name(), format!("noise distribution error: {e}")))?;

        let values: Vec<f64> = (0..self.count)
            .map(|i| self.slope * i as f64 + self.intercept + normal.sample(&mut rng))
            .collect();

        debug!("generated {} synthetic values (seed {})", values.len(), self.seed);

        Ok(Series {
            name: self.name(),
            values,
            dates: None,
            skipped: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(seed: u64, noise: f64) -> SyntheticSource {
        SyntheticSource {
            count: 50,
            seed,
            slope: 0.5,
            intercept: 10.0,
            noise,
        }
    }

    #[test]
    fn same_seed_same_series() {
        let a = source(7, 1.0).load().unwrap();
        let b = source(7, 1.0).load().unwrap();
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn different_seed_different_series() {
        let a = source(7, 1.0).load().unwrap();
        let b = source(8, 1.0).load().unwrap();
        assert_ne!(a.values, b.values);
    }

    #[test]
    fn zero_noise_is_exact_line() {
        let s = source(1, 0.0).load().unwrap();
        assert_eq!(s.values.len(), 50);
        for (i, v) in s.values.iter().enumerate() {
            assert!((v - (0.5 * i as f64 + 10.0)).abs() < 1e-12);
        }
        assert!(s.dates.is_none());
    }

    #[test]
    fn empty_or_bad_settings_are_unavailable() {
        let mut s = source(1, 1.0);
        s.count = 0;
        assert!(s.load().is_err());

        assert!(source(1, -1.0).load().is_err());
        assert!(source(1, f64::NAN).load().is_err());
    }
}
