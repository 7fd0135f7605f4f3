//! Samples and the series produced by the reader

/// One observation from the input series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub real: f64,
    /// Present only when the input is read as complex
    pub imag: Option<f64>,
}

/// Sample gap that strayed from the resolved interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftWarning {
    /// 1-based input line of the later sample
    pub line: usize,

    /// Index of the later sample
    pub sample_index: usize,

    /// Observed gap `t[i] - t[i-1]`
    pub gap: f64,

    /// Resolved sampling interval
    pub dt: f64,
}

impl DriftWarning {
    pub fn relative_deviation(&self) -> f64 {
        ((self.gap - self.dt) / self.dt).abs()
    }
}

/// Ordered samples plus the resolved sampling interval
#[derive(Debug, Clone)]
pub struct SampleSeries {
    samples: Vec<Sample>,
    dt: f64,
    warnings: Vec<DriftWarning>,
}

impl SampleSeries {
    pub(crate) fn new(samples: Vec<Sample>, dt: f64, warnings: Vec<DriftWarning>) -> Self {
        Self {
            samples,
            dt,
            warnings,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Resolved sampling interval (always positive)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Gaps that exceeded the drift tolerance, in file order
    pub fn warnings(&self) -> &[DriftWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn real_values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.real).collect()
    }

    /// Imaginary parts of the samples that carry one
    pub fn imag_values(&self) -> Vec<f64> {
        self.samples.iter().filter_map(|s| s.imag).collect()
    }

    /// Average spacing over the whole series, `(t_last - t_0) / (N - 1)`
    pub fn mean_spacing(&self) -> Option<f64> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) if self.samples.len() > 1 => {
                Some((last.time - first.time) / (self.samples.len() - 1) as f64)
            }
            _ => None,
        }
    }
}
