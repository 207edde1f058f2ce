//! # adcal - ADC Linearization Analysis
//!
//! `adcal` fits a linear calibration model to paired measurements of a known
//! reference value and a raw ADC reading, reports fit quality, and emits
//! reusable conversion coefficients and C code.
//!
//! ## Key Features
//!
//! - **Closed-form least squares**: slope, intercept, R², and the standard
//!   error of the slope, computed in one pass over the samples.
//!
//! - **Error analysis**: per-sample residuals and percentage errors, with
//!   max/min/mean/stddev summary statistics.
//!
//! - **Code generation**: C conversion functions (`adc_to_voltage`,
//!   `voltage_to_adc`, or any other quantity name) parameterized only by the
//!   two fitted constants.
//!
//! - **Visualization**: a four-panel analysis chart (fit, residuals, inverse
//!   mapping, percentage error) rendered with `plotters` (feature `plots`).
//!
//! - **Flat-text persistence**: a labeled coefficients file ready to paste
//!   into firmware.
//!
//! ## Quick Start
//!
//! ```rust
//! use adcal::calibrator::{error_stats, fit};
//! use adcal::report::CalibrationReport;
//! use adcal::sample::SampleSet;
//!
//! let samples = SampleSet::from_csv_reader(
//!     "real,adc\n0.0,63.0\n4.97,4339.0\n9.93,8700.0\n14.91,13069.0\n".as_bytes(),
//! )?;
//!
//! let fit = fit(&samples)?;
//! let errors = error_stats(&samples, &fit)?;
//!
//! let report = CalibrationReport::new("bench.csv", "voltage", &samples, fit, errors);
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`sample`]: measurement data model, validation, and CSV ingestion
//! - [`calibrator`]: the least-squares core (fit, inverse, error statistics)
//! - [`report`]: human-readable report and C code generation
//! - [`persist`]: flat-text coefficients file
//! - [`plot`]: four-panel analysis chart (feature `plots`)
//!
//! The core is pure and synchronous; all I/O lives at the edges.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod calibrator;
pub mod persist;
#[cfg(feature = "plots")]
pub mod plot;
pub mod report;
pub mod sample;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::calibrator::{
        error_stats, fit, percent_errors, residuals, CalibrationError, ErrorStats, FitResult,
    };
    pub use crate::persist::{write_coefficients, PersistError};
    #[cfg(feature = "plots")]
    pub use crate::plot::render_analysis;
    pub use crate::report::{conversion_functions, CalibrationReport};
    pub use crate::sample::{IngestError, Sample, SampleSet};
}
