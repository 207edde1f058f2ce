//! Fuzz CSV ingestion and the fit pipeline with arbitrary bytes.
//!
//! Every outcome is allowed except a panic: malformed tables must surface as
//! `IngestError`, degenerate ones as `CalibrationError`. Extreme but finite
//! magnitudes may overflow intermediate sums, so numeric assertions are
//! guarded on finiteness.

#![no_main]

use adcal::calibrator::{error_stats, fit};
use adcal::sample::SampleSet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(samples) = SampleSet::from_csv_reader(data) else {
        return;
    };

    let Ok(fitted) = fit(&samples) else {
        return;
    };

    if fitted.r_squared.is_finite() {
        assert!((0.0..=1.0).contains(&fitted.r_squared));
    }

    let _ = fitted.invert(0.0);

    if let Ok(stats) = error_stats(&samples, &fitted) {
        if stats.max_percent_error.is_finite() {
            assert!(stats.max_percent_error >= 0.0);
        }
    }
});
