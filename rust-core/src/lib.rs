//! cl-fft - spectral analysis of column-oriented time series
//!
//! Reads whitespace-delimited time/value columns, infers or validates the
//! sampling interval, runs a forward FFT and lists the spectrum as magnitudes
//! or real/imaginary pairs.

pub mod config;
pub mod pipeline;
pub mod series;
pub mod spectrum;
pub mod synth;

pub use config::{ConfigError, FftConfig};
pub use pipeline::{run, run_with_engine, PipelineError, RunSummary};
pub use series::{ReadError, SampleReader, SampleSeries};
pub use spectrum::{FrequencyUnit, MagnitudeScale, SpectrumEngine};
