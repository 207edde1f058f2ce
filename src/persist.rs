//! Flat-text persistence of the fitted coefficients.
//!
//! The output file is a labeled plain-text summary followed by the generated
//! C conversion functions. It is meant for humans and for pasting into
//! firmware, not for programmatic re-parsing.

use std::io::Write;
use std::path::Path;

use chrono::Local;
use log::info;

use crate::calibrator::{ErrorStats, FitResult};
use crate::report::conversion_functions;

/// Errors returned while writing the coefficients file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// I/O error while creating or writing the output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the fitted coefficients and generated C functions to `path`.
pub fn write_coefficients(
    path: impl AsRef<Path>,
    fit: &FitResult,
    errors: &ErrorStats,
    quantity: &str,
) -> Result<(), PersistError> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "ADC Linearization Coefficients")?;
    writeln!(file, "==============================")?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;
    writeln!(file, "Slope (a): {:.6}", fit.slope)?;
    writeln!(file, "Intercept (b): {:.6}", fit.intercept)?;
    writeln!(file, "R-squared: {:.6}", fit.r_squared)?;
    writeln!(file, "Standard error: {:.6}", fit.standard_error)?;
    writeln!(file, "Maximum error: {:.3}%", errors.max_percent_error)?;
    writeln!(file)?;
    writeln!(file, "C Functions:")?;
    write!(file, "{}", conversion_functions(fit, quantity))?;

    info!("Coefficients saved to '{}'", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_fit() -> (FitResult, ErrorStats) {
        (
            FitResult {
                slope: 0.001146,
                intercept: -0.0441,
                r_squared: 0.999998,
                standard_error: 0.000001,
            },
            ErrorStats {
                max_percent_error: 0.312,
                min_percent_error: -0.214,
                mean_percent_error: 0.008,
                stddev_percent_error: 0.141,
            },
        )
    }

    #[test]
    fn test_write_coefficients_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linearization_coefficients.txt");
        let (fit, errors) = fixture_fit();

        write_coefficients(&path, &fit, &errors, "voltage").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("ADC Linearization Coefficients"));
        assert!(content.contains("Generated: "));
        assert!(content.contains("Slope (a): 0.001146"));
        assert!(content.contains("Intercept (b): -0.044100"));
        assert!(content.contains("R-squared: 0.999998"));
        assert!(content.contains("Maximum error: 0.312%"));
        assert!(content.contains("float adc_to_voltage(float adc_value) {"));
        assert!(content.contains("float voltage_to_adc(float voltage) {"));
    }

    #[test]
    fn test_write_coefficients_bad_path() {
        let (fit, errors) = fixture_fit();
        let result = write_coefficients("/no/such/directory/coeffs.txt", &fit, &errors, "voltage");
        assert!(matches!(result, Err(PersistError::Io(_))));
    }
}
