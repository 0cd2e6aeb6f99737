use std::fmt;
use crate::dsp::{CaptureRecord, SignalError};
/// Root mean square of the samples.
pub fn rms(samples: &[f32]) -> Result<f64, SignalError> {
    if samples.is_empty() {
        return Err(SignalError::InvalidParameter(
            "rms of an empty signal".into(),
        ));
    }
    let sum_sq: f64 = samples
        .iter()
        .map(|&v| {
            let v = v as f64;
            v * v
        })
        .sum();
    Ok((sum_sq / samples.len() as f64).sqrt())
}
/// Peak-to-peak span from the header bounds.
pub fn peak(record: &CaptureRecord) -> f64 {
    record.max_value() as f64 - record.min_value() as f64
}
/// Declared maximum over the RMS of the samples.
pub fn peak_factor(record: &CaptureRecord) -> Result<f64, SignalError> {
    let rms = rms(record.samples())?;
    if !rms.is_finite() {
        return Err(SignalError::InvalidParameter(format!(
            "rms of the samples is {rms}"
        )));
    }
    if rms == 0.0 {
        return Err(SignalError::ZeroRms);
    }
    Ok(record.max_value() as f64 / rms)
}
/// Time-domain summary of one record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub peak: f64,
    pub rms: f64,
    pub peak_factor: f64,
}
impl Summary {
    pub fn of(record: &CaptureRecord) -> Result<Self, SignalError> {
        Ok(Self {
            min: record.min_value() as f64,
            max: record.max_value() as f64,
            peak: peak(record),
            rms: rms(record.samples())?,
            peak_factor: peak_factor(record)?,
        })
    }
}
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MIN: {:.2}, MAX: {:.2}, PEAK: {:.2}, RMS: {:.2}, PEAK FACTOR: {:.2}",
            self.min, self.max, self.peak, self.rms, self.peak_factor
        )
    }
}
/// One-line summary used as a plot caption.
pub fn describe(record: &CaptureRecord) -> Result<String, SignalError> {
    Ok(Summary::of(record)?.to_string())
}
