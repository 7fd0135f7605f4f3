//! Spectrum engine: one forward transform per call over real or complex samples

use num_complex::Complex;
use thiserror::Error;

use super::fft::RustFftBackend;
use crate::series::SampleSeries;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("reverse transform is not supported")]
    Unsupported,

    #[error("cannot transform an empty signal")]
    EmptyInput,

    #[error("Re and Im array sizes not equal: {real} != {imag}")]
    SizeMismatch { real: usize, imag: usize },

    #[error("transform backend returned {got} bins, expected {expected}")]
    BinCount { expected: usize, got: usize },

    #[error("transform backend failed: {0}")]
    Backend(String),
}

/// Transform direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    /// Always rejected
    Reverse,
}

/// Kind of samples a spectrum was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Real,
    Complex,
}

/// Forward DFT capability
///
/// Implementations must return `N/2+1` bins from `forward_real` and `N` bins
/// from `forward_complex`, unnormalized.
pub trait ForwardTransform {
    fn forward_real(&mut self, samples: &[f64]) -> Result<Vec<Complex<f64>>, SpectrumError>;

    fn forward_complex(
        &mut self,
        samples: &[Complex<f64>],
    ) -> Result<Vec<Complex<f64>>, SpectrumError>;
}

/// Complex spectrum owned by the caller
#[derive(Debug, Clone)]
pub struct Spectrum {
    bins: Vec<Complex<f64>>,
    sample_count: usize,
    kind: InputKind,
}

impl Spectrum {
    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    /// Number of time-domain samples `N`
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Number of bins a forward transform of `n` samples yields
pub fn expected_bins(n: usize, kind: InputKind) -> usize {
    match kind {
        InputKind::Real => n / 2 + 1,
        InputKind::Complex => n,
    }
}

/// Wraps a [`ForwardTransform`] backend
pub struct SpectrumEngine<T: ForwardTransform = RustFftBackend> {
    backend: T,
}

impl SpectrumEngine<RustFftBackend> {
    pub fn new() -> Self {
        Self::with_backend(RustFftBackend::new())
    }
}

impl Default for SpectrumEngine<RustFftBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ForwardTransform> SpectrumEngine<T> {
    pub fn with_backend(backend: T) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &T {
        &self.backend
    }

    /// Transform a whole series
    ///
    /// # Arguments
    /// * `direction` - Must be `Forward`; `Reverse` fails before any work
    /// * `series` - Samples as read from the input
    /// * `input_complex` - Use the imaginary parts of the samples
    pub fn compute(
        &mut self,
        direction: Direction,
        series: &SampleSeries,
        input_complex: bool,
    ) -> Result<Spectrum, SpectrumError> {
        if direction == Direction::Reverse {
            return Err(SpectrumError::Unsupported);
        }

        let real = series.real_values();
        if input_complex {
            let imag = series.imag_values();
            self.forward_complex(&real, &imag)
        } else {
            self.forward_real(&real)
        }
    }

    /// Real-to-complex transform, `N/2+1` bins
    pub fn forward_real(&mut self, samples: &[f64]) -> Result<Spectrum, SpectrumError> {
        if samples.is_empty() {
            return Err(SpectrumError::EmptyInput);
        }

        let bins = self.backend.forward_real(samples)?;
        Self::finish(bins, samples.len(), InputKind::Real)
    }

    /// Complex-to-complex transform, `N` bins
    ///
    /// `real` and `imag` must have the same length.
    pub fn forward_complex(
        &mut self,
        real: &[f64],
        imag: &[f64],
    ) -> Result<Spectrum, SpectrumError> {
        if real.len() != imag.len() {
            return Err(SpectrumError::SizeMismatch {
                real: real.len(),
                imag: imag.len(),
            });
        }
        if real.is_empty() {
            return Err(SpectrumError::EmptyInput);
        }

        let samples: Vec<Complex<f64>> = real
            .iter()
            .zip(imag)
            .map(|(&re, &im)| Complex::new(re, im))
            .collect();

        let bins = self.backend.forward_complex(&samples)?;
        Self::finish(bins, samples.len(), InputKind::Complex)
    }

    fn finish(
        bins: Vec<Complex<f64>>,
        sample_count: usize,
        kind: InputKind,
    ) -> Result<Spectrum, SpectrumError> {
        let expected = expected_bins(sample_count, kind);
        if bins.len() != expected {
            return Err(SpectrumError::BinCount {
                expected,
                got: bins.len(),
            });
        }

        log::debug!(
            "{:?} transform of {} samples -> {} bins",
            kind,
            sample_count,
            bins.len()
        );

        Ok(Spectrum {
            bins,
            sample_count,
            kind,
        })
    }
}
