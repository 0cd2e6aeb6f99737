//! Butterworth band-pass design and forward-only IIR filtering.
//!
//! Design path: analog Butterworth prototype, low-pass to band-pass
//! transform around the pre-warped band edges, bilinear transform, then
//! expansion of the zeros and poles into transfer-function polynomials.
//! The filter runs once, forward, from a zero state, so the output lags
//! the input in phase.
//!
//! Coefficients are kept in transfer-function form. That form loses
//! precision quickly: high orders combined with a narrow band relative to
//! the sample rate can yield an unstable filter. Orders are not clamped;
//! callers that need steep skirts should keep `order` small or widen the band.
use std::f64::consts::PI;
use log::debug;
use rustfft::num_complex::Complex64;
use crate::dsp::SignalError;
/// `H(z) = (b0 + b1 z^-1 + ...) / (a0 + a1 z^-1 + ...)`
#[derive(Clone, Debug, PartialEq)]
pub struct TransferFunction {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}
impl TransferFunction {
    /// Filter order in z (number of poles).
    pub fn order(&self) -> usize {
        self.a.len().saturating_sub(1)
    }
}
/// Designs a digital Butterworth band-pass with `2 * order` poles.
pub fn butter_bandpass(
    low_hz: f64,
    high_hz: f64,
    sample_rate: f64,
    order: usize,
) -> Result<TransferFunction, SignalError> {
    validate_band(low_hz, high_hz, sample_rate, order)?;
    let (zeros, poles, gain) = bandpass_zpk(low_hz, high_hz, sample_rate, order);
    Ok(zpk_to_tf(&zeros, &poles, gain))
}
/// Band-passes `samples`, returning a sequence of the same length.
pub fn bandpass_filter(
    samples: &[f32],
    low_hz: f64,
    high_hz: f64,
    sample_rate: f64,
    order: usize,
) -> Result<Vec<f64>, SignalError> {
    if samples.is_empty() {
        return Err(SignalError::InvalidParameter(
            "cannot filter an empty signal".into(),
        ));
    }
    let tf = butter_bandpass(low_hz, high_hz, sample_rate, order)?;
    debug!(
        "band-pass {low_hz}..{high_hz} Hz at {sample_rate} Hz: {} poles",
        tf.order()
    );
    let mut filter = LinearFilter::new(&tf)?;
    Ok(samples
        .iter()
        .map(|&v| filter.process(v as f64))
        .collect())
}
fn validate_band(
    low_hz: f64,
    high_hz: f64,
    sample_rate: f64,
    order: usize,
) -> Result<(), SignalError> {
    if order == 0 {
        return Err(SignalError::InvalidParameter(
            "filter order must be at least 1".into(),
        ));
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(SignalError::InvalidParameter(format!(
            "sample rate must be positive, got {sample_rate}"
        )));
    }
    let nyquist = 0.5 * sample_rate;
    if !(low_hz > 0.0 && low_hz < high_hz && high_hz < nyquist) {
        return Err(SignalError::InvalidParameter(format!(
            "band edges must satisfy 0 < {low_hz} < {high_hz} < {nyquist} (Nyquist)"
        )));
    }
    Ok(())
}
/// Zeros, poles and gain of the digital band-pass.
fn bandpass_zpk(
    low_hz: f64,
    high_hz: f64,
    sample_rate: f64,
    order: usize,
) -> (Vec<Complex64>, Vec<Complex64>, f64) {
    let nyquist = 0.5 * sample_rate;
    // Design at a normalized rate of 2 so that edges are fractions of Nyquist.
    let fs = 2.0;
    let low = prewarp(low_hz / nyquist, fs);
    let high = prewarp(high_hz / nyquist, fs);
    let bandwidth = high - low;
    let center = (low * high).sqrt();
    // Low-pass prototype to band-pass: every pole splits in two, and `order`
    // zeros appear at the origin.
    let mut analog_poles = Vec::with_capacity(2 * order);
    for p in butterworth_poles(order) {
        let p = p * (bandwidth / 2.0);
        let root = (p * p - center * center).sqrt();
        analog_poles.push(p + root);
        analog_poles.push(p - root);
    }
    let analog_zeros = vec![Complex64::new(0.0, 0.0); order];
    let analog_gain = bandwidth.powi(order as i32);
    bilinear(&analog_zeros, &analog_poles, analog_gain, fs)
}
/// Maps s-plane zeros/poles to the z-plane; surplus poles get zeros at z = -1.
fn bilinear(
    zeros: &[Complex64],
    poles: &[Complex64],
    gain: f64,
    fs: f64,
) -> (Vec<Complex64>, Vec<Complex64>, f64) {
    let fs2 = Complex64::new(2.0 * fs, 0.0);
    let mut z_zeros: Vec<Complex64> = zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
    let z_poles: Vec<Complex64> = poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();
    z_zeros.resize(poles.len(), Complex64::new(-1.0, 0.0));
    let num: Complex64 = zeros.iter().map(|&z| fs2 - z).product();
    let den: Complex64 = poles.iter().map(|&p| fs2 - p).product();
    let z_gain = gain * (num / den).re;
    (z_zeros, z_poles, z_gain)
}
fn zpk_to_tf(zeros: &[Complex64], poles: &[Complex64], gain: f64) -> TransferFunction {
    let b = poly(zeros).into_iter().map(|c| c.re * gain).collect();
    let a = poly(poles).into_iter().map(|c| c.re).collect();
    TransferFunction { b, a }
}
/// Monic polynomial with the given roots, highest power first.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &r in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= r * prev;
        }
    }
    coeffs
}
fn prewarp(normalized: f64, fs: f64) -> f64 {
    2.0 * fs * (PI * normalized / fs).tan()
}
/// Unit-cutoff analog Butterworth poles, all in the left half plane.
fn butterworth_poles(order: usize) -> Vec<Complex64> {
    let n = order as i64;
    (0..n)
        .map(|k| {
            let m = (-n + 1 + 2 * k) as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * order as f64))
        })
        .collect()
}
/// Direct form II transposed IIR section.
#[derive(Clone, Debug)]
pub struct LinearFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    state: Vec<f64>,
}
impl LinearFilter {
    pub fn new(tf: &TransferFunction) -> Result<Self, SignalError> {
        let a0 = tf.a.first().copied().unwrap_or(0.0);
        if a0 == 0.0 {
            return Err(SignalError::InvalidParameter(
                "leading denominator coefficient must be non-zero".into(),
            ));
        }
        let len = tf.a.len().max(tf.b.len());
        let mut b = tf.b.clone();
        let mut a = tf.a.clone();
        b.resize(len, 0.0);
        a.resize(len, 0.0);
        for c in b.iter_mut().chain(a.iter_mut()) {
            *c /= a0;
        }
        Ok(Self {
            b,
            a,
            state: vec![0.0; len - 1],
        })
    }
    pub fn process(&mut self, input: f64) -> f64 {
        let Some(&z0) = self.state.first() else {
            return self.b[0] * input;
        };
        let y = self.b[0] * input + z0;
        let last = self.state.len() - 1;
        for i in 0..last {
            self.state[i] = self.b[i + 1] * input + self.state[i + 1] - self.a[i + 1] * y;
        }
        self.state[last] = self.b[last + 1] * input - self.a[last + 1] * y;
        y
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    fn tone(freq_hz: f64, sample_rate: f64, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate).sin() as f32)
            .collect()
    }
    fn rms(values: &[f64]) -> f64 {
        (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
    }
    #[test]
    fn first_order_matches_closed_form() {
        let (low_hz, high_hz, fs) = (50.0, 150.0, 1000.0);
        let tf = butter_bandpass(low_hz, high_hz, fs, 1).unwrap();
        let wl = 4.0 * (PI * low_hz / fs).tan();
        let wh = 4.0 * (PI * high_hz / fs).tan();
        let bw = wh - wl;
        let w0_sq = wl * wh;
        let d = 16.0 + 4.0 * bw + w0_sq;
        let expected_b = [4.0 * bw / d, 0.0, -4.0 * bw / d];
        let expected_a = [1.0, (2.0 * w0_sq - 32.0) / d, (16.0 - 4.0 * bw + w0_sq) / d];
        assert_eq!(tf.order(), 2);
        for (got, want) in tf.b.iter().zip(expected_b) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
        for (got, want) in tf.a.iter().zip(expected_a) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }
    #[test]
    fn unity_gain_at_band_center() {
        let (low_hz, high_hz, fs) = (40.0, 60.0, 1000.0);
        let tf = butter_bandpass(low_hz, high_hz, fs, 3).unwrap();
        // Digital center corresponds to the geometric mean of the warped edges.
        let wl = 4.0 * (PI * low_hz / fs).tan();
        let wh = 4.0 * (PI * high_hz / fs).tan();
        let omega = 2.0 * ((wl * wh).sqrt() / 4.0).atan();
        let z_inv = Complex64::from_polar(1.0, -omega);
        let horner = |c: &[f64]| {
            let mut acc = Complex64::new(0.0, 0.0);
            let mut zk = Complex64::new(1.0, 0.0);
            for &k in c {
                acc += zk * k;
                zk *= z_inv;
            }
            acc
        };
        let gain = (horner(tf.b.as_slice()) / horner(tf.a.as_slice())).norm();
        assert_relative_eq!(gain, 1.0, epsilon = 1e-6);
    }
    #[test]
    fn passes_in_band_tone_and_rejects_out_of_band() {
        let fs = 1000.0;
        let inside = tone(50.0, fs, 2000);
        let outside = tone(400.0, fs, 2000);
        let kept = bandpass_filter(&inside, 40.0, 60.0, fs, 2).unwrap();
        let dropped = bandpass_filter(&outside, 40.0, 60.0, fs, 2).unwrap();
        assert_eq!(kept.len(), inside.len());
        assert_eq!(dropped.len(), outside.len());
        let input_rms = std::f64::consts::FRAC_1_SQRT_2;
        assert!(rms(&kept[1000..]) > 0.8 * input_rms);
        assert!(rms(&dropped[1000..]) < 0.05 * input_rms);
    }
    #[test]
    fn forward_only_filter_is_causal() {
        let fs = 500.0;
        let mut impulse = vec![0.0f32; 64];
        impulse[10] = 1.0;
        let y = bandpass_filter(&impulse, 20.0, 80.0, fs, 2).unwrap();
        assert!(y[..10].iter().all(|&v| v == 0.0));
        assert!(y[10] != 0.0);
    }
    #[test]
    fn rejects_invalid_band() {
        let s = [0.0f32; 8];
        for (low, high, order) in [(0.0, 10.0, 1), (20.0, 10.0, 1), (10.0, 50.0, 1), (5.0, 10.0, 0)] {
            assert!(matches!(
                bandpass_filter(&s, low, high, 100.0, order),
                Err(SignalError::InvalidParameter(_))
            ));
        }
        assert!(matches!(
            bandpass_filter(&[], 5.0, 10.0, 100.0, 1),
            Err(SignalError::InvalidParameter(_))
        ));
    }
}
