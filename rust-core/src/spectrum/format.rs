//! Text rendering of retained spectrum bins
//!
//! One line per bin, right-aligned fixed-width fields separated by a single
//! space. Numbers use general notation with six significant digits, the same
//! shape C's `%g` produces.

use std::io::{self, Write};

use num_complex::Complex;

use super::engine::Spectrum;
use crate::config::FftConfig;

/// Significant digits of every rendered number
pub const SIGNIFICANT_DIGITS: usize = 6;

/// What each output line carries after the frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `frequency magnitude`
    #[default]
    Magnitude,
    /// `frequency real imag`
    Complex,
}

/// Magnitude normalization for complex input
///
/// Real input always uses `2 / N` since only the non-negative half of its
/// spectrum is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagnitudeScale {
    /// `1 / N` for complex input
    #[default]
    Auto,
    /// `2 / N`, the real-input formula applied to complex input too
    OneSided,
    /// `1 / N`
    TwoSided,
}

impl MagnitudeScale {
    pub fn factor(self, input_complex: bool) -> f64 {
        if !input_complex {
            return 2.0;
        }
        match self {
            MagnitudeScale::OneSided => 2.0,
            MagnitudeScale::Auto | MagnitudeScale::TwoSided => 1.0,
        }
    }
}

/// Normalized magnitude `factor * |bin| / N`
pub fn magnitude(bin: Complex<f64>, sample_count: usize, factor: f64) -> f64 {
    factor * bin.re.hypot(bin.im) / sample_count as f64
}

/// Render `value` in general notation with `precision` significant digits
///
/// Fixed notation is used when the decimal exponent lies in
/// `-4..precision`, scientific otherwise; trailing zeros are removed.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Writes one record per retained bin
#[derive(Debug, Clone)]
pub struct ResultFormatter {
    width: usize,
    mode: OutputMode,
    magnitude_factor: f64,
}

impl ResultFormatter {
    /// Formatter for real-input spectra
    pub fn new(width: usize, mode: OutputMode) -> Self {
        Self {
            width,
            mode,
            magnitude_factor: 2.0,
        }
    }

    pub fn from_config(config: &FftConfig) -> Self {
        Self {
            width: config.field_width,
            mode: config.output_mode(),
            magnitude_factor: config.magnitude_factor(),
        }
    }

    fn field(&self, value: f64) -> String {
        format!(
            "{:>width$}",
            format_general(value, SIGNIFICANT_DIGITS),
            width = self.width
        )
    }

    /// One output line, without the trailing newline
    pub fn format_record(&self, frequency: f64, bin: Complex<f64>, sample_count: usize) -> String {
        match self.mode {
            OutputMode::Complex => format!(
                "{} {} {}",
                self.field(frequency),
                self.field(bin.re),
                self.field(bin.im)
            ),
            OutputMode::Magnitude => format!(
                "{} {}",
                self.field(frequency),
                self.field(magnitude(bin, sample_count, self.magnitude_factor))
            ),
        }
    }

    /// Write the records for `retained` bins of `spectrum`
    ///
    /// # Arguments
    /// * `out` - Destination
    /// * `spectrum` - Transform output
    /// * `retained` - `(bin, frequency)` pairs from the axis mapper
    ///
    /// # Returns
    /// Number of records written
    pub fn write_records<W, I>(
        &self,
        out: &mut W,
        spectrum: &Spectrum,
        retained: I,
    ) -> io::Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = (usize, f64)>,
    {
        let bins = spectrum.bins();
        let mut written = 0;

        for (bin, frequency) in retained {
            let Some(&value) = bins.get(bin) else {
                break;
            };
            writeln!(
                out,
                "{}",
                self.format_record(frequency, value, spectrum.sample_count())
            )?;
            written += 1;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::engine::SpectrumEngine;

    #[test]
    fn test_format_general_fixed() {
        assert_eq!(format_general(0.0, 6), "0");
        assert_eq!(format_general(1.0, 6), "1");
        assert_eq!(format_general(-2.5, 6), "-2.5");
        assert_eq!(format_general(std::f64::consts::FRAC_PI_2, 6), "1.5708");
        assert_eq!(format_general(123456.0, 6), "123456");
        assert_eq!(format_general(0.0001, 6), "0.0001");
        assert_eq!(format_general(9.9999996, 6), "10");
    }

    #[test]
    fn test_format_general_scientific() {
        assert_eq!(format_general(1234567.0, 6), "1.23457e+06");
        assert_eq!(format_general(0.00001, 6), "1e-05");
        assert_eq!(format_general(-3.5e-12, 6), "-3.5e-12");
        assert_eq!(format_general(1.0e100, 6), "1e+100");
        assert_eq!(format_general(f64::MAX, 6), "1.79769e+308");
    }

    #[test]
    fn test_format_general_special() {
        assert_eq!(format_general(f64::NAN, 6), "nan");
        assert_eq!(format_general(f64::INFINITY, 6), "inf");
        assert_eq!(format_general(f64::NEG_INFINITY, 6), "-inf");
        assert_eq!(format_general(-0.0, 6), "-0");
    }

    #[test]
    fn test_magnitude_scale() {
        assert_eq!(MagnitudeScale::Auto.factor(false), 2.0);
        assert_eq!(MagnitudeScale::TwoSided.factor(false), 2.0);
        assert_eq!(MagnitudeScale::Auto.factor(true), 1.0);
        assert_eq!(MagnitudeScale::TwoSided.factor(true), 1.0);
        assert_eq!(MagnitudeScale::OneSided.factor(true), 2.0);
    }

    #[test]
    fn test_magnitude() {
        let bin = Complex::new(3.0, -4.0);
        assert_eq!(magnitude(bin, 10, 2.0), 1.0);
        assert_eq!(magnitude(bin, 10, 1.0), 0.5);
    }

    #[test]
    fn test_record_layout() {
        let formatter = ResultFormatter::new(8, OutputMode::Magnitude);
        let line = formatter.format_record(0.5, Complex::new(0.0, -2.0), 4);
        assert_eq!(line, "     0.5        1");

        let formatter = ResultFormatter::new(6, OutputMode::Complex);
        let line = formatter.format_record(0.25, Complex::new(1.5, -2.0), 4);
        assert_eq!(line, "  0.25    1.5     -2");
    }

    #[test]
    fn test_narrow_width_never_truncates() {
        let formatter = ResultFormatter::new(2, OutputMode::Magnitude);
        let line = formatter.format_record(1234.5, Complex::new(4.0, 0.0), 4);
        assert_eq!(line, "1234.5  2");
    }

    #[test]
    fn test_write_records() {
        let mut engine = SpectrumEngine::new();
        let spectrum = engine.forward_real(&[0.0, 1.0, 0.0, -1.0]).unwrap();
        let formatter = ResultFormatter::new(4, OutputMode::Magnitude);

        let mut out = Vec::new();
        let written = formatter
            .write_records(&mut out, &spectrum, vec![(0, 0.0), (1, 0.25)])
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "   0    0\n0.25    1\n");
    }
}
