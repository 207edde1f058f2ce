use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use adcal::sample::{Sample, SampleSet};

use super::analyze::run_pipeline;
use super::config::DEFAULT_PLOT_SIZE;

/// Built-in demo measurements: a bipolar supply rail swept from -35 V to
/// +35 V against a 16-bit ADC. (reference, raw) pairs.
const DEMO_MEASUREMENTS: &[(f64, f64)] = &[
    (-35.27, 16647.0),
    (-30.19, 18761.0),
    (-25.14, 20894.0),
    (-19.96, 23039.0),
    (-14.92, 25196.0),
    (-9.95, 27354.0),
    (-7.38, 28425.0),
    (-4.93, 29497.0),
    (-2.526, 30570.0),
    (2.448, 32707.0),
    (4.92, 33836.0),
    (7.39, 34927.0),
    (9.91, 36015.0),
    (14.96, 38192.0),
    (19.95, 40357.0),
    (25.08, 42520.0),
    (30.19, 44649.0),
    (35.27, 46740.0),
];

/// Assemble the embedded demo table as a validated sample set.
pub(crate) fn demo_samples() -> Result<SampleSet> {
    let samples = DEMO_MEASUREMENTS
        .iter()
        .map(|&(reference, raw)| Sample::new(reference, raw))
        .collect();
    SampleSet::new(samples).context("Demo measurement table is invalid")
}

/// Run the analysis on the built-in demo measurement table.
pub fn run(output_dir: PathBuf, quantity: String) -> Result<()> {
    info!("adcal Demo - bipolar supply rail calibration");
    info!("============================================");

    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            output_dir.display()
        )
    })?;

    let samples = demo_samples()?;
    info!("Using {} embedded measurements", samples.len());

    let coefficients = output_dir.join("linearization_coefficients.txt");
    let plot = output_dir.join("demo_analysis.png");

    run_pipeline(
        &samples,
        "built-in demo",
        &quantity,
        &coefficients,
        Some(&plot),
        DEFAULT_PLOT_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcal::calibrator;

    #[test]
    fn test_demo_samples_are_well_posed() {
        let samples = demo_samples().unwrap();
        assert_eq!(samples.len(), 18);

        let fit = calibrator::fit(&samples).unwrap();
        // The demo rail is close to ideal: tight linear response.
        assert!(fit.r_squared > 0.9999, "r_squared = {}", fit.r_squared);
        assert!(fit.slope > 0.0);

        let errors = calibrator::error_stats(&samples, &fit).unwrap();
        assert!(errors.max_percent_error < 5.0);
    }
}
