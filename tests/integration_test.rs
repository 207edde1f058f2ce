//! Integration tests for adcal
//!
//! These tests verify the full pipeline from CSV ingestion to the persisted
//! coefficients file.

use adcal::calibrator::{error_stats, fit};
use adcal::persist::write_coefficients;
use adcal::report::CalibrationReport;
use adcal::sample::SampleSet;
use std::fs;
use tempfile::tempdir;

const BENCH_CSV: &str = "\
real,adc
0.0,63.0
4.97,4339.0
9.93,8700.0
14.91,13069.0
19.90,17439.0
24.89,21766.0
29.88,26120.0
34.87,30357.0
36.37,31605.0
";

/// Test the complete CSV-to-coefficients-file cycle
#[test]
fn test_csv_to_coefficients_cycle() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("measurements.csv");
    let output = dir.path().join("linearization_coefficients.txt");

    fs::write(&input, BENCH_CSV).unwrap();

    let samples = SampleSet::from_csv_path(&input).unwrap();
    assert_eq!(samples.len(), 9);

    let fit = fit(&samples).unwrap();
    assert!(fit.r_squared > 0.9999);
    assert!(fit.slope > 0.0);

    let errors = error_stats(&samples, &fit).unwrap();
    assert!(errors.max_percent_error < 2.0);

    write_coefficients(&output, &fit, &errors, "voltage").unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains(&format!("Slope (a): {:.6}", fit.slope)));
    assert!(content.contains(&format!("Intercept (b): {:.6}", fit.intercept)));
    assert!(content.contains("float adc_to_voltage(float adc_value) {"));
    assert!(content.contains("float voltage_to_adc(float voltage) {"));
}

/// The report renders the same numbers the calibrator computed
#[test]
fn test_report_matches_fit() {
    let samples = SampleSet::from_csv_reader(BENCH_CSV.as_bytes()).unwrap();
    let fit = fit(&samples).unwrap();
    let errors = error_stats(&samples, &fit).unwrap();

    let report = CalibrationReport::new("measurements.csv", "voltage", &samples, fit, errors);
    let text = format!("{report}");

    assert!(text.contains("Number of data points: 9"));
    assert!(text.contains(&format!("Slope (a): {:.6}", fit.slope)));
    assert!(text.contains(&format!("R-squared: {:.6}", fit.r_squared)));
    assert!(text.contains(&format!(
        "Maximum error: {:.3}%",
        errors.max_percent_error
    )));
}

/// Forward and inverse conversion agree across the calibrated range
#[test]
fn test_forward_inverse_consistency() {
    let samples = SampleSet::from_csv_reader(BENCH_CSV.as_bytes()).unwrap();
    let fit = fit(&samples).unwrap();

    for sample in &samples {
        let predicted = fit.predict(sample.raw);
        let back = fit.invert(predicted).unwrap();
        assert!(
            (back - sample.raw).abs() < 1e-6,
            "raw {} round-tripped to {back}",
            sample.raw
        );
    }
}

/// A degenerate table fails loudly, end to end
#[test]
fn test_degenerate_csv_fails() {
    let csv = "real,adc\n1.0,500.0\n2.0,500.0\n3.0,500.0\n";
    let samples = SampleSet::from_csv_reader(csv.as_bytes()).unwrap();

    let err = fit(&samples).unwrap_err();
    assert!(err.to_string().contains("all raw values identical"));
}

/// Render the four-panel analysis chart to a real file.
///
/// Chart captions need a system font at draw time, which headless CI images
/// often lack, so this test is opt-in.
#[cfg(feature = "plots")]
#[test]
#[ignore = "requires a system font for chart labels"]
fn test_render_analysis_chart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("analysis.png");

    let samples = SampleSet::from_csv_reader(BENCH_CSV.as_bytes()).unwrap();
    let fit = fit(&samples).unwrap();

    adcal::plot::render_analysis(&samples, &fit, "voltage", &path, (800, 600)).unwrap();

    let metadata = fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0);
}
