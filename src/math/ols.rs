//! Closed-form single-predictor least squares.
//!
//! For one predictor the normal equations reduce to two centered sums:
//!
//! ```text
//! slope     = Σ (x_i - x̄)(y_i - ȳ) / Σ (x_i - x̄)^2
//! intercept = ȳ - slope · x̄
//! ```
//!
//! Two passes over the data: one for the means, one for the centered sums.
//! Centering before multiplying keeps the sums well conditioned for the
//! bounded-magnitude inputs this crate targets, so no QR/SVD is needed.

/// Means and centered second moments of a paired sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenteredSums {
    pub x_mean: f64,
    pub y_mean: f64,
    /// `Σ (x_i - x̄)^2`
    pub sxx: f64,
    /// `Σ (x_i - x̄)(y_i - ȳ)`
    pub sxy: f64,
    /// `Σ (y_i - ȳ)^2`
    pub syy: f64,
}

/// Compute means and centered sums.
///
/// Returns `None` for empty input. Callers are responsible for checking that
/// `xs` and `ys` have the same length and contain finite values.
pub fn centered_sums(xs: &[f64], ys: &[f64]) -> Option<CenteredSums> {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return None;
    }
    let nf = n as f64;

    let x_mean = xs[..n].iter().sum::<f64>() / nf;
    let y_mean = ys[..n].iter().sum::<f64>() / nf;

    let (sxx, sxy, syy) = xs[..n]
        .iter()
        .zip(&ys[..n])
        .fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), (&x, &y)| {
            let dx = x - x_mean;
            let dy = y - y_mean;
            (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
        });

    Some(CenteredSums {
        x_mean,
        y_mean,
        sxx,
        sxy,
        syy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_sums_simple_system() {
        // y = 2 + 3x on x = [0,1,2]
        let s = centered_sums(&[0.0, 1.0, 2.0], &[2.0, 5.0, 8.0]).unwrap();
        assert!((s.x_mean - 1.0).abs() < 1e-12);
        assert!((s.y_mean - 5.0).abs() < 1e-12);
        assert!((s.sxx - 2.0).abs() < 1e-12);
        assert!((s.sxy - 6.0).abs() < 1e-12);
        assert!((s.syy - 18.0).abs() < 1e-12);
    }

    #[test]
    fn centered_sums_empty_is_none() {
        assert!(centered_sums(&[], &[]).is_none());
    }

    #[test]
    fn constant_predictor_has_zero_sxx() {
        let s = centered_sums(&[4.0, 4.0, 4.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(s.sxx, 0.0);
    }
}
