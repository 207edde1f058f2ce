//! # adcal
//!
//! Command-line tool for one-shot ADC calibration analysis: fit a linear
//! model to paired (reference, raw) measurements, print the analysis report,
//! write the coefficients file, and render the analysis chart.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze a CSV measurement table (header: real,adc)
//! adcal analyze measurements.csv
//!
//! # Run the built-in demo dataset
//! adcal demo
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
