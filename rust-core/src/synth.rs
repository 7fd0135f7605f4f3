//! Synthetic test signals
//!
//! Produces the two reference files used to exercise the analyzer: a real
//! sine (with its cosine as a spare column) and a sine of complex frequency,
//! both optionally carrying a component at the Nyquist frequency.

use std::f64::consts::PI;
use std::io::{self, Write};

use num_complex::Complex;

use crate::spectrum::format::{format_general, SIGNIFICANT_DIGITS};

/// Parameters of the generated signal
#[derive(Debug, Clone)]
pub struct SignalSpec {
    /// Number of samples
    pub samples: usize,

    /// Time step
    pub dt: f64,

    /// Ordinary frequency of the sine
    pub frequency: f64,

    /// Imaginary part of the frequency (complex file only), gives growth or decay
    pub imag_frequency: f64,

    /// Sine amplitude
    pub amplitude: f64,

    /// Amplitude of the alternating `-A, +A, -A, ...` component
    pub nyquist_amplitude: f64,

    /// Phase shift in radians
    pub phase: f64,
}

impl Default for SignalSpec {
    fn default() -> Self {
        Self {
            samples: 100_000,
            dt: 1.0e-4,
            frequency: 50.0,
            imag_frequency: -0.01,
            amplitude: 1.0,
            nyquist_amplitude: 0.0,
            phase: 0.0,
        }
    }
}

impl SignalSpec {
    pub fn time(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }

    fn nyquist_term(&self, i: usize) -> f64 {
        if i & 1 == 1 {
            self.nyquist_amplitude
        } else {
            -self.nyquist_amplitude
        }
    }

    /// `(a·sin(ωt + φ) + cA, a·cos(ωt + φ))` for sample `i`
    pub fn real_sample(&self, i: usize) -> (f64, f64) {
        let phase = 2.0 * PI * self.frequency * self.time(i) + self.phase;
        (
            self.amplitude * phase.sin() + self.nyquist_term(i),
            self.amplitude * phase.cos(),
        )
    }

    /// `a·sin(2π(f + i·b)t + φ) + cA` for sample `i`
    pub fn complex_sample(&self, i: usize) -> Complex<f64> {
        let t = self.time(i);
        let arg = Complex::new(
            2.0 * PI * self.frequency * t + self.phase,
            2.0 * PI * self.imag_frequency * t,
        );
        arg.sin() * self.amplitude + self.nyquist_term(i)
    }

    /// Lines of `t  value  0.0  cosine`
    pub fn write_real<W: Write>(&self, out: &mut W, width: usize) -> io::Result<()> {
        let field = |v: f64| format!("{:>width$}", format_general(v, SIGNIFICANT_DIGITS));
        for i in 0..self.samples {
            let (value, cosine) = self.real_sample(i);
            writeln!(
                out,
                "{} {} 0.0 {}",
                field(self.time(i)),
                field(value),
                field(cosine)
            )?;
        }
        Ok(())
    }

    /// Lines of `t  re  im  |s|`
    pub fn write_complex<W: Write>(&self, out: &mut W, width: usize) -> io::Result<()> {
        let field = |v: f64| format!("{:>width$}", format_general(v, SIGNIFICANT_DIGITS));
        for i in 0..self.samples {
            let s = self.complex_sample(i);
            writeln!(
                out,
                "{} {} {} {}",
                field(self.time(i)),
                field(s.re),
                field(s.im),
                field(s.norm())
            )?;
        }
        Ok(())
    }
}
