//! Measurement sample model and CSV ingestion.
//!
//! Calibration input is a table of paired measurements: a known reference
//! value ("real") and the raw ADC reading observed for it ("adc"). The table
//! is validated once at construction; every downstream computation can then
//! assume finite values and matching column lengths.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::calibrator::CalibrationError;

/// Errors returned while loading a measurement table.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error while reading the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV record
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Structurally valid input that violates the sample contract
    #[error(transparent)]
    Invalid(#[from] CalibrationError),
}

/// A single paired measurement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Sample {
    /// Independently known true physical quantity for this reading.
    #[serde(alias = "real")]
    pub reference: f64,
    /// Uncalibrated sensor reading (ADC output).
    #[serde(alias = "adc")]
    pub raw: f64,
}

impl Sample {
    /// Create a sample from a (reference, raw) pair.
    pub fn new(reference: f64, raw: f64) -> Self {
        Self { reference, raw }
    }
}

/// Validated, immutable sequence of measurement samples.
///
/// Invariants established at construction:
/// - at least one sample is present
/// - every reference and raw value is finite
///
/// Sample order is preserved but irrelevant to the fit.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Validate and wrap a sequence of samples.
    pub fn new(samples: Vec<Sample>) -> Result<Self, CalibrationError> {
        if samples.is_empty() {
            return Err(CalibrationError::InvalidInput(
                "sample set is empty".to_string(),
            ));
        }

        for (i, sample) in samples.iter().enumerate() {
            if !sample.reference.is_finite() {
                return Err(CalibrationError::InvalidInput(format!(
                    "sample {}: reference value {} is not finite",
                    i, sample.reference
                )));
            }
            if !sample.raw.is_finite() {
                return Err(CalibrationError::InvalidInput(format!(
                    "sample {}: raw value {} is not finite",
                    i, sample.raw
                )));
            }
        }

        Ok(Self { samples })
    }

    /// Build a sample set from separate reference and raw columns.
    ///
    /// Fails with `InvalidInput` when the columns have different lengths.
    pub fn from_columns(reference: &[f64], raw: &[f64]) -> Result<Self, CalibrationError> {
        if reference.len() != raw.len() {
            return Err(CalibrationError::InvalidInput(format!(
                "column length mismatch: {} reference values, {} raw values",
                reference.len(),
                raw.len()
            )));
        }

        let samples = reference
            .iter()
            .zip(raw.iter())
            .map(|(&reference, &raw)| Sample { reference, raw })
            .collect();

        Self::new(samples)
    }

    /// Load a sample set from a CSV file with a `real,adc` header.
    ///
    /// The header names of the original measurement logs (`real`, `adc`) and
    /// the field names (`reference`, `raw`) are both accepted.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load a sample set from any CSV source with a `real,adc` header.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self, IngestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut samples = Vec::new();
        for record in csv_reader.deserialize() {
            let sample: Sample = record?;
            samples.push(sample);
        }

        Ok(Self::new(samples)?)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the set holds no samples (never observable after
    /// construction, provided for API completeness).
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over the samples in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Samples as a slice.
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// (min, max) of the reference column.
    pub fn reference_range(&self) -> (f64, f64) {
        Self::column_range(self.samples.iter().map(|s| s.reference))
    }

    /// (min, max) of the raw column.
    pub fn raw_range(&self) -> (f64, f64) {
        Self::column_range(self.samples.iter().map(|s| s.raw))
    }

    fn column_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
        values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        })
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
