use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod analyze;
mod config;
mod demo;

/// adcal - ADC Linearization Analysis
#[derive(Parser)]
#[command(name = "adcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV measurement table (header: real,adc)
    Analyze {
        /// Input CSV file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Coefficients output path (defaults to
        /// linearization_coefficients.txt next to the input)
        #[arg(long, value_name = "FILE")]
        coefficients: Option<PathBuf>,

        /// Analysis chart output path (defaults to <stem>_analysis.png;
        /// requires the plots feature)
        #[arg(long, value_name = "FILE")]
        plot: Option<PathBuf>,

        /// Skip rendering the analysis chart
        #[arg(long, default_value_t = false)]
        no_plot: bool,

        /// Name of the calibrated quantity, used in the report and the
        /// generated C function names
        #[arg(short = 'q', long)]
        quantity: Option<String>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Run the analysis on the built-in demo measurement table
    Demo {
        /// Directory for the generated output files
        #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Name of the calibrated quantity
        #[arg(short = 'q', long, default_value = "voltage")]
        quantity: String,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            input,
            coefficients,
            plot,
            no_plot,
            quantity,
            config,
        } => analyze::run(analyze::AnalyzeArgs {
            input,
            coefficients,
            plot,
            no_plot,
            quantity,
            config,
        }),
        Commands::Demo {
            output_dir,
            quantity,
        } => demo::run(output_dir, quantity),
    }
}
