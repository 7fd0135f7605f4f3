//! Sequential analysis pipeline
//!
//! reader -> engine -> axis -> formatter, each stage run once. The first
//! failing stage aborts the run.

use std::io::{self, BufRead, Write};

use log::info;
use thiserror::Error;

use crate::config::{ConfigError, FftConfig};
use crate::series::{ReadError, SampleReader};
use crate::spectrum::axis::retained_bins;
use crate::spectrum::engine::{ForwardTransform, SpectrumEngine, SpectrumError};
use crate::spectrum::format::ResultFormatter;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("input data error: {0}")]
    Read(#[from] ReadError),

    #[error(transparent)]
    Spectrum(#[from] SpectrumError),

    #[error("Fail to open file <{path}>: {source}")]
    OpenInput {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Fail to open output file <{path}>: {source}")]
    OpenOutput {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

impl PipelineError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Config(ConfigError::ReverseUnsupported)
            | PipelineError::Spectrum(SpectrumError::Unsupported) => 10,
            PipelineError::Config(_) => 1,
            PipelineError::OpenInput { .. } => 2,
            PipelineError::OpenOutput { .. } => 3,
            PipelineError::Read(_) | PipelineError::Spectrum(SpectrumError::EmptyInput) => 4,
            PipelineError::Write(_) => 5,
            PipelineError::Spectrum(SpectrumError::SizeMismatch { .. }) => 7,
            PipelineError::Spectrum(_) => 6,
        }
    }
}

/// What a successful run did
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Samples read
    pub samples: usize,

    /// Resolved sampling interval
    pub dt: f64,

    /// Bins produced by the transform
    pub bins: usize,

    /// Records written
    pub records: usize,

    /// Gaps that exceeded the drift tolerance
    pub drift_warnings: usize,
}

/// Run the whole pipeline with the default FFT backend
pub fn run<R, W>(
    config: &FftConfig,
    input: R,
    output: &mut W,
) -> Result<RunSummary, PipelineError>
where
    R: BufRead,
    W: Write,
{
    run_with_engine(config, &mut SpectrumEngine::new(), input, output)
}

/// Run the whole pipeline with a caller-supplied engine
///
/// # Arguments
/// * `config` - Validated before anything is read
/// * `engine` - Performs the single forward transform
/// * `input` - Column text
/// * `output` - Receives one line per retained bin
pub fn run_with_engine<T, R, W>(
    config: &FftConfig,
    engine: &mut SpectrumEngine<T>,
    input: R,
    output: &mut W,
) -> Result<RunSummary, PipelineError>
where
    T: ForwardTransform,
    R: BufRead,
    W: Write,
{
    config.validate()?;

    let series = SampleReader::from_config(config).read(input)?;
    let spectrum = engine.compute(config.direction, &series, config.input_complex)?;

    let retained = retained_bins(
        spectrum.len(),
        series.dt(),
        spectrum.sample_count(),
        config.frequency_unit,
        config.drop_zero_bin,
        config.max_frequency,
    );

    let records = ResultFormatter::from_config(config)
        .write_records(output, &spectrum, retained)
        .map_err(PipelineError::Write)?;
    output.flush().map_err(PipelineError::Write)?;

    let summary = RunSummary {
        samples: series.len(),
        dt: series.dt(),
        bins: spectrum.len(),
        records,
        drift_warnings: series.warnings().len(),
    };
    info!(
        "{} samples, dt = {}, {} bins, {} records written",
        summary.samples, summary.dt, summary.bins, summary.records
    );

    Ok(summary)
}
