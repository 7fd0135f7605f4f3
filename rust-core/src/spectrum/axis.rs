//! Frequency axis for transform bins
//!
//! Bin `i` of an `N`-sample transform sits at `i * unit / (dt * N)`. All
//! functions here are pure in their arguments.

use std::f64::consts::PI;

/// Frequency unit of the output axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    /// ω, radians per time unit
    #[default]
    Angular,
    /// f, cycles per time unit (Hz for seconds)
    Ordinary,
}

impl FrequencyUnit {
    /// 2π for angular frequency, 1 for ordinary
    pub fn factor(self) -> f64 {
        match self {
            FrequencyUnit::Angular => 2.0 * PI,
            FrequencyUnit::Ordinary => 1.0,
        }
    }
}

/// Spacing between adjacent bins, `unit / (dt * N)`
pub fn frequency_step(dt: f64, sample_count: usize, unit: FrequencyUnit) -> f64 {
    unit.factor() / (dt * sample_count as f64)
}

/// Frequency of `bin`
pub fn bin_frequency(bin: usize, dt: f64, sample_count: usize, unit: FrequencyUnit) -> f64 {
    frequency_step(dt, sample_count, unit) * bin as f64
}

/// First bin written to the output
pub fn start_bin(drop_zero: bool) -> usize {
    if drop_zero {
        1
    } else {
        0
    }
}

/// Bins kept for output, with their frequencies, in increasing order
///
/// # Arguments
/// * `bin_count` - Number of bins in the spectrum
/// * `dt` - Sampling interval
/// * `sample_count` - Number of time-domain samples `N`
/// * `unit` - Angular or ordinary frequency
/// * `drop_zero` - Skip bin 0
/// * `max_frequency` - Stop before the first bin above this (a bin exactly at it is kept)
pub fn retained_bins(
    bin_count: usize,
    dt: f64,
    sample_count: usize,
    unit: FrequencyUnit,
    drop_zero: bool,
    max_frequency: f64,
) -> impl Iterator<Item = (usize, f64)> {
    let step = frequency_step(dt, sample_count, unit);

    (start_bin(drop_zero)..bin_count)
        .map(move |bin| (bin, step * bin as f64))
        .take_while(move |&(_, freq)| freq <= max_frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_sample_axis() {
        let freqs: Vec<(usize, f64)> =
            retained_bins(3, 1.0, 4, FrequencyUnit::Angular, false, f64::MAX).collect();

        assert_eq!(freqs.len(), 3);
        assert_eq!(freqs[0], (0, 0.0));
        assert!((freqs[1].1 - PI / 2.0).abs() < 1e-15);
        assert!((freqs[2].1 - PI).abs() < 1e-15);
    }

    #[test]
    fn test_ordinary_unit() {
        // 1000 samples at 1 ms -> 1 Hz bins
        assert!((frequency_step(1e-3, 1000, FrequencyUnit::Ordinary) - 1.0).abs() < 1e-12);
        assert!((bin_frequency(50, 1e-3, 1000, FrequencyUnit::Ordinary) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_drop_zero() {
        let first = retained_bins(5, 1.0, 8, FrequencyUnit::Ordinary, true, f64::MAX)
            .next()
            .unwrap();
        assert_eq!(first.0, 1);
        assert_eq!(first.1, 0.125);
    }

    #[test]
    fn test_max_frequency_inclusive() {
        // step 0.25 Hz
        let bins: Vec<usize> = retained_bins(9, 0.5, 8, FrequencyUnit::Ordinary, false, 0.5)
            .map(|(bin, _)| bin)
            .collect();
        assert_eq!(bins, vec![0, 1, 2]);

        let bins: Vec<usize> = retained_bins(9, 0.5, 8, FrequencyUnit::Ordinary, false, 0.49)
            .map(|(bin, _)| bin)
            .collect();
        assert_eq!(bins, vec![0, 1]);
    }

    #[test]
    fn test_max_frequency_below_first_bin() {
        let count = retained_bins(9, 1.0, 16, FrequencyUnit::Angular, true, 0.1).count();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_deterministic() {
        let a: Vec<(usize, f64)> =
            retained_bins(100, 0.37, 198, FrequencyUnit::Angular, true, 3.0).collect();
        let b: Vec<(usize, f64)> =
            retained_bins(100, 0.37, 198, FrequencyUnit::Angular, true, 3.0).collect();

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.0, y.0);
            assert_eq!(x.1.to_bits(), y.1.to_bits());
        }
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn unit() -> impl Strategy<Value = FrequencyUnit> {
        prop_oneof![Just(FrequencyUnit::Angular), Just(FrequencyUnit::Ordinary)]
    }

    proptest! {
        #[test]
        fn constant_spacing(dt in 1e-6f64..1e3, n in 2usize..4096, unit in unit()) {
            let step = frequency_step(dt, n, unit);
            let freqs: Vec<f64> = retained_bins(n / 2 + 1, dt, n, unit, false, f64::MAX)
                .map(|(_, f)| f)
                .collect();
            for pair in freqs.windows(2) {
                let spacing = pair[1] - pair[0];
                prop_assert!((spacing - step).abs() <= step * 1e-9,
                    "spacing={} step={}", spacing, step);
            }
        }

        #[test]
        fn zero_bin_handling(
            dt in 1e-6f64..1e3,
            n in 2usize..4096,
            drop_zero in any::<bool>(),
            unit in unit(),
        ) {
            let (bin, freq) = retained_bins(n / 2 + 1, dt, n, unit, drop_zero, f64::MAX)
                .next()
                .unwrap();
            if drop_zero {
                prop_assert_eq!(bin, 1);
            } else {
                prop_assert_eq!(bin, 0);
                prop_assert_eq!(freq, 0.0);
            }
        }

        #[test]
        fn truncation(
            dt in 1e-3f64..10.0,
            n in 2usize..2048,
            f_max in 0.0f64..100.0,
            unit in unit(),
        ) {
            let bin_count = n / 2 + 1;
            let kept: Vec<(usize, f64)> =
                retained_bins(bin_count, dt, n, unit, false, f_max).collect();

            // every kept bin is within bounds and in increasing order from 0
            for (pos, &(bin, freq)) in kept.iter().enumerate() {
                prop_assert_eq!(bin, pos);
                prop_assert!(freq <= f_max);
            }
            // the first excluded bin, if any, is above the limit
            if kept.len() < bin_count {
                prop_assert!(bin_frequency(kept.len(), dt, n, unit) > f_max);
            }
        }

        #[test]
        fn monotonic(dt in 1e-6f64..1e3, n in 2usize..4096, unit in unit()) {
            let freqs: Vec<f64> = retained_bins(n, dt, n, unit, false, f64::MAX)
                .map(|(_, f)| f)
                .collect();
            prop_assert!(freqs.windows(2).all(|w| w[1] > w[0]));
        }
    }
}
