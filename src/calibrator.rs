//! # Linear calibrator
//!
//! Ordinary-least-squares fit of the affine relationship
//! `reference ≈ slope * raw + intercept` over a set of paired measurements,
//! plus the inverse mapping and residual/error statistics.
//!
//! Everything in this module is pure computation over an in-memory
//! [`SampleSet`]: no I/O, no shared state, deterministic for identical input.
//!
//! ## Usage
//!
//! ```rust
//! use adcal::calibrator::{error_stats, fit};
//! use adcal::sample::SampleSet;
//!
//! let samples = SampleSet::from_columns(
//!     &[0.0, 4.97, 9.93, 14.91],
//!     &[63.0, 4339.0, 8700.0, 13069.0],
//! )?;
//!
//! let fit = fit(&samples)?;
//! let errors = error_stats(&samples, &fit)?;
//!
//! println!("reference = {:.6} * raw + {:.6}", fit.slope, fit.intercept);
//! println!("R² = {:.6}, max error = {:.3}%", fit.r_squared, errors.max_percent_error);
//! # Ok::<(), adcal::calibrator::CalibrationError>(())
//! ```

use crate::sample::SampleSet;

/// Calibration error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// The fit is undefined for this input (zero variance, too few samples)
    #[error("ill-posed fit: {0}")]
    IllPosedFit(String),

    /// Inverse mapping with a zero slope
    #[error("division by zero: fitted slope is zero, the inverse mapping is undefined")]
    DivisionByZero,

    /// No sample has a non-zero reference value, so relative error is
    /// undefined everywhere
    #[error("no valid samples: every reference value is zero, percentage error is undefined")]
    NoValidSamples,

    /// Mismatched column lengths or non-finite sample values
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result of a linear calibration fit.
///
/// Immutable once computed; derived entirely from the sample set supplied to
/// [`fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// Slope `a` of `reference = a * raw + b`.
    pub slope: f64,
    /// Intercept `b` of `reference = a * raw + b`.
    pub intercept: f64,
    /// Coefficient of determination, in `[0, 1]`.
    pub r_squared: f64,
    /// Standard error of the slope estimate (`n - 2` degrees of freedom).
    ///
    /// A two-sample fit is exact, so its standard error is reported as zero.
    pub standard_error: f64,
}

impl FitResult {
    /// Predicted reference value for a raw reading.
    pub fn predict(&self, raw: f64) -> f64 {
        self.slope * raw + self.intercept
    }

    /// Raw reading that maps to the given reference value.
    ///
    /// Fails with [`CalibrationError::DivisionByZero`] when the fitted slope
    /// is zero; a well-posed fit never produces one, since zero slope with
    /// non-zero raw variance implies zero reference variance, which
    /// [`fit`] rejects.
    pub fn invert(&self, reference: f64) -> Result<f64, CalibrationError> {
        if self.slope == 0.0 {
            return Err(CalibrationError::DivisionByZero);
        }
        Ok((reference - self.intercept) / self.slope)
    }
}

/// Percentage-error statistics of a fit applied back to its samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorStats {
    /// Largest percentage-error magnitude.
    pub max_percent_error: f64,
    /// Smallest signed percentage error.
    pub min_percent_error: f64,
    /// Mean of the signed percentage errors.
    pub mean_percent_error: f64,
    /// Population standard deviation of the signed percentage errors.
    pub stddev_percent_error: f64,
}

/// Fit `reference = slope * raw + intercept` by ordinary least squares.
///
/// Closed form over mean-centered sums: `slope = s_xy / s_xx`,
/// `intercept = mean_ref - slope * mean_raw`.
///
/// Fails with [`CalibrationError::IllPosedFit`] when:
/// - fewer than 2 samples are supplied (no degrees of freedom for a line),
/// - all raw values are identical (zero variance in the regressor),
/// - all reference values are identical (`r_squared` undefined; this
///   implementation fails rather than reporting a sentinel).
pub fn fit(samples: &SampleSet) -> Result<FitResult, CalibrationError> {
    let n = samples.len();
    if n < 2 {
        return Err(CalibrationError::IllPosedFit(format!(
            "need at least 2 samples to fit a line, got {n}"
        )));
    }

    let n_f = n as f64;
    let mean_raw = samples.iter().map(|s| s.raw).sum::<f64>() / n_f;
    let mean_ref = samples.iter().map(|s| s.reference).sum::<f64>() / n_f;

    let mut s_xx = 0.0;
    let mut s_xy = 0.0;
    let mut s_yy = 0.0;
    for sample in samples {
        let dx = sample.raw - mean_raw;
        let dy = sample.reference - mean_ref;
        s_xx += dx * dx;
        s_xy += dx * dy;
        s_yy += dy * dy;
    }

    if s_xx == 0.0 {
        return Err(CalibrationError::IllPosedFit(
            "all raw values identical (zero variance)".to_string(),
        ));
    }
    if s_yy == 0.0 {
        return Err(CalibrationError::IllPosedFit(
            "all reference values identical (total sum of squares is zero)".to_string(),
        ));
    }

    let slope = s_xy / s_xx;
    let intercept = mean_ref - slope * mean_raw;

    let ss_res: f64 = samples
        .iter()
        .map(|s| {
            let residual = s.reference - (slope * s.raw + intercept);
            residual * residual
        })
        .sum();

    // ss_tot equals s_yy by definition; clamp against floating-point drift
    // so an exact fit reports exactly 1.0.
    let r_squared = (1.0 - ss_res / s_yy).clamp(0.0, 1.0);

    let standard_error = if n > 2 {
        ((ss_res / (n_f - 2.0)) / s_xx).sqrt()
    } else {
        // Two samples determine the line exactly; zero residual, zero error.
        0.0
    };

    Ok(FitResult {
        slope,
        intercept,
        r_squared,
        standard_error,
    })
}

/// Per-sample residuals `reference - predicted`, in input order.
pub fn residuals(samples: &SampleSet, fit: &FitResult) -> Vec<f64> {
    samples
        .iter()
        .map(|s| s.reference - fit.predict(s.raw))
        .collect()
}

/// Per-sample `(reference, percentage error)` pairs.
///
/// Samples with a reference value of exactly zero are excluded: the relative
/// error `(actual - predicted) / actual` is undefined there.
pub fn percent_errors(samples: &SampleSet, fit: &FitResult) -> Vec<(f64, f64)> {
    samples
        .iter()
        .filter(|s| s.reference != 0.0)
        .map(|s| {
            let error = (s.reference - fit.predict(s.raw)) / s.reference * 100.0;
            (s.reference, error)
        })
        .collect()
}

/// Percentage-error statistics of `fit` applied back to `samples`.
///
/// `max_percent_error` is the largest error magnitude; the remaining fields
/// are computed over the signed errors, with population standard deviation.
///
/// Fails with [`CalibrationError::NoValidSamples`] when no sample has a
/// non-zero reference value.
pub fn error_stats(samples: &SampleSet, fit: &FitResult) -> Result<ErrorStats, CalibrationError> {
    let errors: Vec<f64> = percent_errors(samples, fit)
        .into_iter()
        .map(|(_, e)| e)
        .collect();

    if errors.is_empty() {
        return Err(CalibrationError::NoValidSamples);
    }

    let n = errors.len() as f64;
    let max_percent_error = errors.iter().fold(0.0_f64, |acc, e| acc.max(e.abs()));
    let min_percent_error = errors.iter().fold(f64::INFINITY, |acc, &e| acc.min(e));
    let mean_percent_error = errors.iter().sum::<f64>() / n;
    let variance = errors
        .iter()
        .map(|e| {
            let d = e - mean_percent_error;
            d * d
        })
        .sum::<f64>()
        / n;

    Ok(ErrorStats {
        max_percent_error,
        min_percent_error,
        mean_percent_error,
        stddev_percent_error: variance.sqrt(),
    })
}
