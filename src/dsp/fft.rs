use rustfft::{num_complex::Complex64, FftPlanner};
use crate::dsp::record::positive_receive_time;
use crate::dsp::SignalError;
/// One-sided magnitude spectrum of a capture.
#[derive(Clone, Debug)]
pub struct FrequencySpectrum {
    pub frequencies_hz: Vec<f64>,
    pub magnitudes: Vec<f64>,
}
/// DFT magnitudes for bins `0..n/2`, scaled by `1 / (n/2)`.
///
/// Bin `k` sits at `k / receive_time` Hz, so the axis depends only on the
/// sample count and the capture duration.
pub fn spectrum(samples: &[f32], receive_time: f32) -> Result<FrequencySpectrum, SignalError> {
    let receive_time = positive_receive_time(receive_time)?;
    let n = samples.len();
    if n < 2 {
        return Err(SignalError::InvalidParameter(format!(
            "spectrum needs at least 2 samples, got {n}"
        )));
    }
    let half = n / 2;
    let scale = half as f64;
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex64> = samples
        .iter()
        .map(|&v| Complex64::new(v as f64, 0.0))
        .collect();
    fft.process(&mut buffer);
    let frequencies_hz = (0..half).map(|k| k as f64 / receive_time).collect();
    let magnitudes = buffer.iter().take(half).map(|c| c.norm() / scale).collect();
    Ok(FrequencySpectrum {
        frequencies_hz,
        magnitudes,
    })
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    #[test]
    fn keeps_positive_half() {
        let samples = vec![0.0f32; 100];
        let s = spectrum(&samples, 2.0).unwrap();
        assert_eq!(s.magnitudes.len(), 50);
        assert_eq!(s.frequencies_hz.len(), 50);
        assert_relative_eq!(s.frequencies_hz[1], 0.5);
        let odd = spectrum(&[1.0; 7], 1.0).unwrap();
        assert_eq!(odd.magnitudes.len(), 3);
    }
    #[test]
    fn dc_bin_is_twice_the_mean() {
        let samples = [1.0f32, 3.0, 2.0, 2.0];
        let s = spectrum(&samples, 1.0).unwrap();
        assert_relative_eq!(s.magnitudes[0], 4.0, epsilon = 1e-12);
    }
    #[test]
    fn tone_lands_in_its_bin() {
        // 1 second, 256 samples, 12 Hz cosine of amplitude 3.
        let n = 256;
        let samples: Vec<f32> = (0..n)
            .map(|i| (3.0 * (2.0 * PI * 12.0 * i as f64 / n as f64).cos()) as f32)
            .collect();
        let s = spectrum(&samples, 1.0).unwrap();
        let (peak_bin, peak) = s
            .magnitudes
            .iter()
            .enumerate()
            .fold((0, 0.0), |acc, (i, &m)| if m > acc.1 { (i, m) } else { acc });
        assert_eq!(peak_bin, 12);
        assert_relative_eq!(s.frequencies_hz[peak_bin], 12.0);
        assert_relative_eq!(peak, 3.0, epsilon = 1e-4);
    }
    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(
            spectrum(&[1.0], 1.0),
            Err(SignalError::InvalidParameter(_))
        ));
        assert!(matches!(
            spectrum(&[1.0, 2.0], 0.0),
            Err(SignalError::InvalidParameter(_))
        ));
    }
}
