use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use adcal::calibrator::{error_stats, fit};
use adcal::persist::write_coefficients;
use adcal::report::CalibrationReport;
use adcal::sample::SampleSet;

use super::config::Config;

/// Default quantity label when neither flag nor config names one.
const DEFAULT_QUANTITY: &str = "voltage";

/// Resolved arguments for the analyze command.
pub struct AnalyzeArgs {
    pub input: PathBuf,
    pub coefficients: Option<PathBuf>,
    pub plot: Option<PathBuf>,
    pub no_plot: bool,
    pub quantity: Option<String>,
    pub config: Option<PathBuf>,
}

/// Run the full analysis on a CSV measurement table.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // CLI flags override the config file, which overrides the defaults.
    let quantity = args
        .quantity
        .or_else(|| config.analysis.quantity.clone())
        .unwrap_or_else(|| DEFAULT_QUANTITY.to_string());

    let coefficients = args
        .coefficients
        .unwrap_or_else(|| args.input.with_file_name("linearization_coefficients.txt"));

    let plot_path = if args.no_plot {
        None
    } else {
        Some(args.plot.unwrap_or_else(|| default_plot_path(&args.input)))
    };

    info!("adcal - ADC Linearization Analysis");
    info!("==================================");
    info!("Input: {}", args.input.display());
    info!("Quantity: {}", quantity);

    let samples = SampleSet::from_csv_path(&args.input)
        .with_context(|| format!("Failed to load samples from {}", args.input.display()))?;
    info!("Loaded {} samples", samples.len());

    run_pipeline(
        &samples,
        &args.input.display().to_string(),
        &quantity,
        &coefficients,
        plot_path.as_deref(),
        config.plot_size(),
    )
}

/// Default chart path: `<input stem>_analysis.png` next to the input.
fn default_plot_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}_analysis.png"))
}

/// Fit, report, persist, and plot one sample set.
///
/// Shared by `analyze` and `demo`; the only difference between the two
/// commands is where the samples and output paths come from.
pub(crate) fn run_pipeline(
    samples: &SampleSet,
    source: &str,
    quantity: &str,
    coefficients_path: &Path,
    plot_path: Option<&Path>,
    plot_size: (u32, u32),
) -> Result<()> {
    let fit = fit(samples).context("Calibration fit failed")?;
    let errors = error_stats(samples, &fit).context("Error analysis failed")?;

    let report = CalibrationReport::new(source, quantity, samples, fit, errors);

    #[cfg(feature = "colorized_output")]
    println!("{}", report.format_colored());

    #[cfg(not(feature = "colorized_output"))]
    println!("{}", report);

    write_coefficients(coefficients_path, &fit, &errors, quantity).with_context(|| {
        format!(
            "Failed to write coefficients to {}",
            coefficients_path.display()
        )
    })?;
    println!("Coefficients saved to '{}'", coefficients_path.display());

    if let Some(plot_path) = plot_path {
        render_plot(samples, &fit, quantity, plot_path, plot_size)?;
    }

    Ok(())
}

#[cfg(feature = "plots")]
fn render_plot(
    samples: &SampleSet,
    fit: &adcal::calibrator::FitResult,
    quantity: &str,
    path: &Path,
    size: (u32, u32),
) -> Result<()> {
    adcal::plot::render_analysis(samples, fit, quantity, path, size)
        .map_err(|e| anyhow::anyhow!("Failed to render analysis chart: {e}"))?;
    println!("Plot saved to '{}'", path.display());
    Ok(())
}

#[cfg(not(feature = "plots"))]
fn render_plot(
    _samples: &SampleSet,
    _fit: &adcal::calibrator::FitResult,
    _quantity: &str,
    path: &Path,
    _size: (u32, u32),
) -> Result<()> {
    log::warn!(
        "Built without the plots feature; skipping chart {}",
        path.display()
    );
    Ok(())
}
