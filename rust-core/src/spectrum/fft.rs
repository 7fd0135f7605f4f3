//! FFT backend using realfft for real-valued signals and rustfft for complex ones
//!
//! Plans are cached by the planners, so repeated calls with the same length
//! only pay for planning once.

use num_complex::Complex;
use realfft::RealFftPlanner;
use rustfft::FftPlanner;

use super::engine::{ForwardTransform, SpectrumError};

/// Default forward transform backend
pub struct RustFftBackend {
    /// Real-to-complex planner (N/2+1 output bins)
    real_planner: RealFftPlanner<f64>,

    /// Complex-to-complex planner (N output bins)
    complex_planner: FftPlanner<f64>,
}

impl RustFftBackend {
    pub fn new() -> Self {
        Self {
            real_planner: RealFftPlanner::<f64>::new(),
            complex_planner: FftPlanner::<f64>::new(),
        }
    }
}

impl Default for RustFftBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForwardTransform for RustFftBackend {
    fn forward_real(&mut self, samples: &[f64]) -> Result<Vec<Complex<f64>>, SpectrumError> {
        let r2c = self.real_planner.plan_fft_forward(samples.len());

        // realfft uses the input as scratch space
        let mut input = samples.to_vec();
        let mut output = r2c.make_output_vec();

        r2c.process(&mut input, &mut output)
            .map_err(|e| SpectrumError::Backend(e.to_string()))?;

        Ok(output)
    }

    fn forward_complex(
        &mut self,
        samples: &[Complex<f64>],
    ) -> Result<Vec<Complex<f64>>, SpectrumError> {
        let fft = self.complex_planner.plan_fft_forward(samples.len());

        let mut buffer = samples.to_vec();
        fft.process(&mut buffer);

        Ok(buffer)
    }
}
