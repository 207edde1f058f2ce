//! # Calibration report
//!
//! Renders a fitted calibration as human-readable text: dataset summary,
//! coefficients, forward/inverse formulas, generated C conversion functions,
//! and the error analysis. The plain [`std::fmt::Display`] output is the
//! canonical report; [`CalibrationReport::format_colored`] adds terminal
//! styling when the `colorized_output` feature is enabled.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::calibrator::{ErrorStats, FitResult};
use crate::sample::SampleSet;

/// Generated C source for the two conversion functions.
///
/// The functions are parameterized only by the fitted constants; `quantity`
/// names the physical quantity in the function identifiers (for example
/// `voltage` yields `adc_to_voltage` / `voltage_to_adc`).
pub fn conversion_functions(fit: &FitResult, quantity: &str) -> String {
    format!(
        "// Function to convert ADC value to {quantity}\n\
         float adc_to_{quantity}(float adc_value) {{\n\
         \x20   return {slope:.6}f * adc_value + {intercept:.6}f;\n\
         }}\n\
         \n\
         // Function to convert {quantity} to ADC value\n\
         float {quantity}_to_adc(float {quantity}) {{\n\
         \x20   return ({quantity} - {intercept:.6}f) / {slope:.6}f;\n\
         }}\n",
        slope = fit.slope,
        intercept = fit.intercept,
    )
}

/// Complete calibration analysis report for one sample set.
#[derive(Debug, Clone)]
pub struct CalibrationReport {
    /// Label identifying where the samples came from (file path or "demo").
    pub source: String,
    /// Name of the physical quantity being calibrated ("voltage", ...).
    pub quantity: String,
    /// Number of samples in the analysis.
    pub sample_count: usize,
    /// (min, max) of the reference column.
    pub reference_range: (f64, f64),
    /// (min, max) of the raw column.
    pub raw_range: (f64, f64),
    /// The fitted coefficients and quality metrics.
    pub fit: FitResult,
    /// Percentage-error statistics of the fit.
    pub errors: ErrorStats,
}

impl CalibrationReport {
    /// Assemble a report from the analysis outputs.
    pub fn new(
        source: impl Into<String>,
        quantity: impl Into<String>,
        samples: &SampleSet,
        fit: FitResult,
        errors: ErrorStats,
    ) -> Self {
        Self {
            source: source.into(),
            quantity: quantity.into(),
            sample_count: samples.len(),
            reference_range: samples.reference_range(),
            raw_range: samples.raw_range(),
            fit,
            errors,
        }
    }

    /// Format the report with terminal colors.
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!(
                "{}\n",
                style("ADC LINEARIZATION ANALYSIS").bold().cyan()
            ));
            output.push_str(&format!("{}\n", style("==========================").cyan()));
            output.push_str(&format!(
                "{}: {}\n",
                style("Source").bold(),
                self.source
            ));
            output.push_str(&self.data_summary());
            output.push('\n');

            output.push_str(&format!(
                "{}\n",
                style("LINEARIZATION COEFFICIENTS").bold()
            ));
            output.push_str("--------------------------\n");
            output.push_str(&self.coefficients());
            output.push('\n');

            output.push_str(&format!("{}\n", style("LINEARIZATION FUNCTIONS").bold()));
            output.push_str("-----------------------\n");
            output.push_str(&self.formulas());
            output.push('\n');

            output.push_str(&format!("{}\n", style("C CODE IMPLEMENTATION").bold()));
            output.push_str("---------------------\n");
            output.push_str(&conversion_functions(&self.fit, &self.quantity));
            output.push('\n');

            output.push_str(&format!("{}\n", style("ERROR ANALYSIS").bold()));
            output.push_str("--------------\n");
            output.push_str(&self.error_analysis());

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }

    fn data_summary(&self) -> String {
        let (ref_min, ref_max) = self.reference_range;
        let (raw_min, raw_max) = self.raw_range;
        format!(
            "Number of data points: {}\n\
             Reference range: {ref_min:.2} to {ref_max:.2}\n\
             ADC range: {raw_min:.6} to {raw_max:.6}\n",
            self.sample_count
        )
    }

    fn coefficients(&self) -> String {
        format!(
            "Slope (a): {:.6}\n\
             Intercept (b): {:.6}\n\
             R-squared: {:.6}\n\
             Standard error: {:.6}\n",
            self.fit.slope, self.fit.intercept, self.fit.r_squared, self.fit.standard_error
        )
    }

    fn formulas(&self) -> String {
        format!(
            "{quantity} = {slope:.6} × ADC + {intercept:.6}\n\
             ADC = ({quantity} - {intercept:.6}) / {slope:.6}\n",
            quantity = self.quantity,
            slope = self.fit.slope,
            intercept = self.fit.intercept,
        )
    }

    fn error_analysis(&self) -> String {
        format!(
            "Maximum error: {:.3}%\n\
             Minimum error: {:.3}%\n\
             Mean error: {:.3}%\n\
             Standard deviation of error: {:.3}%\n",
            self.errors.max_percent_error,
            self.errors.min_percent_error,
            self.errors.mean_percent_error,
            self.errors.stddev_percent_error
        )
    }
}

impl fmt::Display for CalibrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ADC LINEARIZATION ANALYSIS")?;
        writeln!(f, "==========================")?;
        writeln!(f, "Source: {}", self.source)?;
        write!(f, "{}", self.data_summary())?;
        writeln!(f)?;

        writeln!(f, "LINEARIZATION COEFFICIENTS")?;
        writeln!(f, "--------------------------")?;
        write!(f, "{}", self.coefficients())?;
        writeln!(f)?;

        writeln!(f, "LINEARIZATION FUNCTIONS")?;
        writeln!(f, "-----------------------")?;
        write!(f, "{}", self.formulas())?;
        writeln!(f)?;

        writeln!(f, "C CODE IMPLEMENTATION")?;
        writeln!(f, "---------------------")?;
        write!(f, "{}", conversion_functions(&self.fit, &self.quantity))?;
        writeln!(f)?;

        writeln!(f, "ERROR ANALYSIS")?;
        writeln!(f, "--------------")?;
        write!(f, "{}", self.error_analysis())?;

        Ok(())
    }
}
