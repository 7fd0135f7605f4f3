//! Column reader for whitespace-delimited time series
//!
//! One sample per data line. Blank lines and lines starting with `#` or `;`
//! are comments. Lines are decoded lossily, so stray non-UTF-8 bytes only
//! matter when they land in a parsed column.
//!
//! The sampling interval is either fixed by the caller or taken
//! from the first gap and then watched for drift.

use std::io::{self, BufRead};

use log::{debug, warn};
use thiserror::Error;

use super::sample::{DriftWarning, Sample, SampleSeries};
use crate::config::{FftConfig, DEFAULT_DRIFT_TOLERANCE};

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("read only {found} of {required} columns in line {line}: \"{text}\"")]
    MissingColumns {
        line: usize,
        found: usize,
        required: usize,
        text: String,
    },

    #[error("failed to convert column {column} in line {line}: \"{field}\" (line: \"{text}\")")]
    BadNumber {
        line: usize,
        column: usize,
        field: String,
        text: String,
    },

    #[error("bad delta t value {gap} = {time} - {previous} in line {line}")]
    NonPositiveInterval {
        line: usize,
        gap: f64,
        time: f64,
        previous: f64,
    },

    #[error("no samples found in input")]
    Empty,

    #[error("a single sample is not enough to infer the time step")]
    SingleSample,

    #[error("failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    /// 1-based input line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            ReadError::MissingColumns { line, .. }
            | ReadError::BadNumber { line, .. }
            | ReadError::NonPositiveInterval { line, .. }
            | ReadError::Io { line, .. } => Some(*line),
            ReadError::Empty | ReadError::SingleSample => None,
        }
    }
}

/// Parses text columns into a [`SampleSeries`]
#[derive(Debug, Clone)]
pub struct SampleReader {
    time_column: usize,
    real_column: usize,
    imag_column: Option<usize>,
    fixed_dt: Option<f64>,
    drift_tolerance: f64,
}

impl SampleReader {
    /// Reader for real-valued samples with an inferred time step
    pub fn new(time_column: usize, real_column: usize) -> Self {
        Self {
            time_column,
            real_column,
            imag_column: None,
            fixed_dt: None,
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
        }
    }

    pub fn from_config(config: &FftConfig) -> Self {
        Self {
            time_column: config.time_column,
            real_column: config.real_column,
            imag_column: config.effective_imag_column(),
            fixed_dt: config.fixed_dt(),
            drift_tolerance: config.drift_tolerance,
        }
    }

    /// Also read an imaginary part from `column`
    pub fn with_imag_column(mut self, column: usize) -> Self {
        self.imag_column = Some(column);
        self
    }

    /// Use `dt` instead of inferring it; non-positive values are ignored
    pub fn with_fixed_dt(mut self, dt: f64) -> Self {
        self.fixed_dt = Some(dt).filter(|&dt| dt > 0.0);
        self
    }

    pub fn with_drift_tolerance(mut self, tolerance: f64) -> Self {
        self.drift_tolerance = tolerance;
        self
    }

    /// Number of fields every data line must provide
    pub fn required_columns(&self) -> usize {
        let highest = self
            .time_column
            .max(self.real_column)
            .max(self.imag_column.unwrap_or(0));
        highest + 1
    }

    /// Read the whole stream
    ///
    /// # Returns
    /// All samples in file order and the resolved time step, or the first
    /// fatal error. Drift beyond the tolerance is logged and recorded in the
    /// series, never fatal.
    pub fn read<R: BufRead>(&self, input: R) -> Result<SampleSeries, ReadError> {
        let required = self.required_columns();
        let inferring = self.fixed_dt.is_none();

        let mut samples: Vec<Sample> = Vec::new();
        let mut warnings = Vec::new();
        let mut dt = self.fixed_dt;
        let mut previous_time = 0.0;

        for (idx, raw) in input.split(b'\n').enumerate() {
            let line_no = idx + 1;
            let raw = raw.map_err(|source| ReadError::Io {
                line: line_no,
                source,
            })?;
            let line = String::from_utf8_lossy(&raw);
            let text = line.trim();
            if is_comment(text) {
                continue;
            }

            let sample = self.parse_line(text, line_no, required)?;
            let n = samples.len();

            if inferring && n > 0 {
                let gap = sample.time - previous_time;
                match dt {
                    None => {
                        if gap.is_nan() || gap <= 0.0 {
                            return Err(ReadError::NonPositiveInterval {
                                line: line_no,
                                gap,
                                time: sample.time,
                                previous: previous_time,
                            });
                        }
                        dt = Some(gap);
                    }
                    Some(dt) => {
                        if ((gap - dt) / dt).abs() > self.drift_tolerance {
                            warn!(
                                "Inconsistent dt {} vs {} in line {} (sample {})",
                                gap, dt, line_no, n
                            );
                            warnings.push(DriftWarning {
                                line: line_no,
                                sample_index: n,
                                gap,
                                dt,
                            });
                        }
                    }
                }
            }

            previous_time = sample.time;
            samples.push(sample);
        }

        if samples.is_empty() {
            return Err(ReadError::Empty);
        }
        let dt = dt.ok_or(ReadError::SingleSample)?;

        let series = SampleSeries::new(samples, dt, warnings);
        debug!(
            "dt_1 = {} dt_n = {:?} samples = {} drift warnings = {}",
            dt,
            series.mean_spacing(),
            series.len(),
            series.warnings().len()
        );

        Ok(series)
    }

    fn parse_line(&self, text: &str, line: usize, required: usize) -> Result<Sample, ReadError> {
        let fields: Vec<&str> = text.split_whitespace().take(required).collect();
        if fields.len() < required {
            return Err(ReadError::MissingColumns {
                line,
                found: fields.len(),
                required,
                text: text.to_string(),
            });
        }

        let column = |idx: usize| -> Result<f64, ReadError> {
            fields[idx].parse::<f64>().map_err(|_| ReadError::BadNumber {
                line,
                column: idx,
                field: fields[idx].to_string(),
                text: text.to_string(),
            })
        };

        let time = column(self.time_column)?;
        let real = column(self.real_column)?;
        let imag = match self.imag_column {
            Some(idx) => Some(column(idx)?),
            None => None,
        };

        Ok(Sample { time, real, imag })
    }
}

/// Blank after trimming, or starts with `#` / `;`
fn is_comment(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';')
}
