use crate::dsp::record::positive_receive_time;
use crate::dsp::{CaptureRecord, SignalError};
/// Sample instants `i * receive_time / n` for `i in 0..n`.
pub fn time_axis(record: &CaptureRecord) -> Result<Vec<f64>, SignalError> {
    let receive_time = positive_receive_time(record.receive_time())?;
    let n = record.samples().len();
    if n == 0 {
        return Err(SignalError::InvalidParameter(
            "time axis of an empty record".into(),
        ));
    }
    let step = receive_time / n as f64;
    Ok((0..n).map(|i| i as f64 * step).collect())
}
/// Running trapezoidal integral starting from zero.
pub fn cumulative_integral<T>(samples: &[T], time_axis: &[f64]) -> Result<Vec<f64>, SignalError>
where
    T: Copy + Into<f64>,
{
    if samples.len() != time_axis.len() {
        return Err(SignalError::InvalidParameter(format!(
            "{} samples against a {}-point time axis",
            samples.len(),
            time_axis.len()
        )));
    }
    if samples.is_empty() {
        return Err(SignalError::InvalidParameter(
            "integral of an empty signal".into(),
        ));
    }
    let mut out = Vec::with_capacity(samples.len());
    let mut acc = 0.0;
    out.push(acc);
    for i in 1..samples.len() {
        let dt = time_axis[i] - time_axis[i - 1];
        acc += dt * (samples[i].into() + samples[i - 1].into()) * 0.5;
        out.push(acc);
    }
    Ok(out)
}
/// Integral of the integral, e.g. acceleration to displacement.
pub fn double_integral<T>(samples: &[T], time_axis: &[f64]) -> Result<Vec<f64>, SignalError>
where
    T: Copy + Into<f64>,
{
    let once = cumulative_integral(samples, time_axis)?;
    cumulative_integral(&once, time_axis)
}
