//! Run configuration for the spectrum pipeline
//!
//! Resolved once before any input is read and never mutated afterwards.

use thiserror::Error;

use crate::spectrum::axis::FrequencyUnit;
use crate::spectrum::engine::Direction;
use crate::spectrum::format::{MagnitudeScale, OutputMode};

/// Relative drift tolerance used when none is configured
pub const DEFAULT_DRIFT_TOLERANCE: f64 = 0.3;

/// Output field width used when none is configured
pub const DEFAULT_FIELD_WIDTH: usize = 18;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("reverse transform is not supported")]
    ReverseUnsupported,

    #[error("drift tolerance must be a non-negative finite number (got {0})")]
    BadTolerance(f64),

    #[error("forced time step must be finite (got {0})")]
    BadTimeStep(f64),

    #[error("maximum frequency must be a number")]
    BadMaxFrequency,
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct FftConfig {
    /// Zero-based column holding the sample time
    pub time_column: usize,

    /// Zero-based column holding the real part (or the scalar value)
    pub real_column: usize,

    /// Zero-based column holding the imaginary part.
    /// `None` means "next to the real column" when the input is complex.
    pub imag_column: Option<usize>,

    /// Treat input as complex samples
    pub input_complex: bool,

    /// Emit real/imaginary pairs instead of magnitudes
    pub output_complex: bool,

    /// Transform direction, only `Forward` is implemented
    pub direction: Direction,

    /// Fixed sampling interval; `None` or a non-positive value means infer it
    pub forced_dt: Option<f64>,

    /// Relative deviation of a sample gap from `dt` that triggers a warning
    pub drift_tolerance: f64,

    /// Highest frequency written to the output (inclusive)
    pub max_frequency: f64,

    /// Skip the zero-frequency bin
    pub drop_zero_bin: bool,

    /// Angular (rad per time unit) or ordinary frequency
    pub frequency_unit: FrequencyUnit,

    /// Width of every numeric output field
    pub field_width: usize,

    /// Magnitude normalization; only consulted for complex input
    pub magnitude_scale: MagnitudeScale,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self {
            time_column: 0,
            real_column: 1,
            imag_column: None,
            input_complex: false,
            output_complex: false,
            direction: Direction::Forward,
            forced_dt: None,
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
            max_frequency: f64::MAX,
            drop_zero_bin: false,
            frequency_unit: FrequencyUnit::Angular,
            field_width: DEFAULT_FIELD_WIDTH,
            magnitude_scale: MagnitudeScale::Auto,
        }
    }
}

impl FftConfig {
    /// Check the configuration before any I/O happens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.direction == Direction::Reverse {
            return Err(ConfigError::ReverseUnsupported);
        }
        if !self.drift_tolerance.is_finite() || self.drift_tolerance < 0.0 {
            return Err(ConfigError::BadTolerance(self.drift_tolerance));
        }
        if self.max_frequency.is_nan() {
            return Err(ConfigError::BadMaxFrequency);
        }
        if let Some(dt) = self.forced_dt {
            if !dt.is_finite() {
                return Err(ConfigError::BadTimeStep(dt));
            }
        }
        Ok(())
    }

    /// Imaginary column actually read from the input, if any
    pub fn effective_imag_column(&self) -> Option<usize> {
        match self.imag_column {
            Some(idx) => Some(idx),
            None if self.input_complex => Some(self.real_column + 1),
            None => None,
        }
    }

    /// Forced sampling interval, `None` when it must be inferred
    pub fn fixed_dt(&self) -> Option<f64> {
        self.forced_dt.filter(|&dt| dt > 0.0)
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.output_complex {
            OutputMode::Complex
        } else {
            OutputMode::Magnitude
        }
    }

    /// Factor applied to `hypot(re, im) / N` in magnitude mode
    pub fn magnitude_factor(&self) -> f64 {
        self.magnitude_scale.factor(self.input_complex)
    }
}
