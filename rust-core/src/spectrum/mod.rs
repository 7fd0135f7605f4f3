//! Spectral analysis with FFT

pub mod axis;
pub mod engine;
pub mod fft;
pub mod format;

pub use axis::{retained_bins, FrequencyUnit};
pub use engine::{Direction, ForwardTransform, InputKind, Spectrum, SpectrumEngine, SpectrumError};
pub use fft::RustFftBackend;
pub use format::{MagnitudeScale, OutputMode, ResultFormatter};
