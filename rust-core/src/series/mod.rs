//! Time-series ingestion from whitespace-delimited text columns

pub mod reader;
pub mod sample;

pub use reader::{ReadError, SampleReader};
pub use sample::{DriftWarning, Sample, SampleSeries};
