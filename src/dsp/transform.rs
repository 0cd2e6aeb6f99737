use crate::dsp::fft::spectrum;
use crate::dsp::filter::bandpass_filter;
use crate::dsp::integrate::{cumulative_integral, double_integral, time_axis};
use crate::dsp::{CaptureRecord, SignalError};
use crate::types::PlotMode;
/// Paired x/y values ready to plot.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self { x, y }
    }
    pub fn len(&self) -> usize {
        self.x.len()
    }
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y]).collect()
    }
    /// `(x_min, x_max, y_min, y_max)` over the points whose coordinates are
    /// both finite, or `None` when there are no such points.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.x
            .iter()
            .zip(&self.y)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| (x, x, y, y))
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1), a.2.min(b.2), a.3.max(b.3)))
    }
    /// Maximal runs of consecutive finite points. Non-finite points break
    /// the line instead of stretching it.
    pub fn finite_runs(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (&x, &y) in self.x.iter().zip(&self.y) {
            if x.is_finite() && y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}
/// A series tagged with the record it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedSeries {
    pub label: String,
    pub series: Series,
}
pub type TransformFn = fn(&CaptureRecord) -> Result<Series, SignalError>;
impl PlotMode {
    /// The pure function that produces this mode's plot.
    pub fn transform(self) -> TransformFn {
        match self {
            PlotMode::TimeDomain => time_domain_series,
            PlotMode::Spectrum => spectrum_series,
            PlotMode::Integral => integral_series,
            PlotMode::DoubleIntegral => double_integral_series,
        }
    }
}
pub fn time_domain_series(record: &CaptureRecord) -> Result<Series, SignalError> {
    let t = time_axis(record)?;
    let y = record.samples().iter().map(|&v| v as f64).collect();
    Ok(Series::new(t, y))
}
pub fn spectrum_series(record: &CaptureRecord) -> Result<Series, SignalError> {
    let s = spectrum(record.samples(), record.receive_time())?;
    Ok(Series::new(s.frequencies_hz, s.magnitudes))
}
pub fn integral_series(record: &CaptureRecord) -> Result<Series, SignalError> {
    let t = time_axis(record)?;
    let y = cumulative_integral(record.samples(), &t)?;
    Ok(Series::new(t, y))
}
pub fn double_integral_series(record: &CaptureRecord) -> Result<Series, SignalError> {
    let t = time_axis(record)?;
    let y = double_integral(record.samples(), &t)?;
    Ok(Series::new(t, y))
}
/// Band-passed trace at the record's own sample rate.
pub fn filtered_series(
    record: &CaptureRecord,
    low_hz: f64,
    high_hz: f64,
    order: usize,
) -> Result<Series, SignalError> {
    let t = time_axis(record)?;
    let y = bandpass_filter(
        record.samples(),
        low_hz,
        high_hz,
        record.sample_rate()?,
        order,
    )?;
    Ok(Series::new(t, y))
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::record::tests::record;
    #[test]
    fn bounds_and_runs_skip_non_finite_points() {
        let s = Series::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![1.0, f64::INFINITY, -2.0, f64::NAN, 5.0],
        );
        assert_eq!(s.bounds(), Some((0.0, 4.0, -2.0, 5.0)));
        assert_eq!(
            s.finite_runs(),
            vec![vec![(0.0, 1.0)], vec![(2.0, -2.0)], vec![(4.0, 5.0)]]
        );
        let nan = Series::new(vec![0.0, 1.0], vec![f64::NAN, f64::NAN]);
        assert_eq!(nan.bounds(), None);
        assert!(nan.finite_runs().is_empty());
        assert_eq!(Series::default().bounds(), None);
    }
    #[test]
    fn every_mode_has_a_transform() {
        let r = record((0..64).map(|i| (i as f32 * 0.2).sin()).collect(), 1.0, 1.0, -1.0);
        for mode in PlotMode::ALL {
            let series = mode.transform()(&r).unwrap();
            let expected = if mode == PlotMode::Spectrum { 32 } else { 64 };
            assert_eq!(series.len(), expected, "{mode:?}");
            assert_eq!(series.x.len(), series.y.len());
        }
    }
    #[test]
    fn time_domain_pairs_axis_with_samples() {
        let r = record(vec![1.0, 2.0, 3.0, 4.0], 2.0, 4.0, 1.0);
        let s = time_domain_series(&r).unwrap();
        assert_eq!(s.points(), vec![[0.0, 1.0], [0.5, 2.0], [1.0, 3.0], [1.5, 4.0]]);
        assert_eq!(s.bounds(), Some((0.0, 1.5, 1.0, 4.0)));
    }
    #[test]
    fn filtered_series_uses_record_sample_rate() {
        // 1000 samples over 1 s => 1000 Hz; 600 Hz would exceed Nyquist.
        let r = record(vec![0.5; 1000], 1.0, 1.0, -1.0);
        let s = filtered_series(&r, 10.0, 100.0, 1).unwrap();
        assert_eq!(s.len(), 1000);
        assert!(matches!(
            filtered_series(&r, 10.0, 600.0, 1),
            Err(SignalError::InvalidParameter(_))
        ));
    }
    #[test]
    fn transforms_leave_the_record_untouched() {
        let r = record(vec![3.0, -1.0, 2.0, 0.0], 1.0, 3.0, -1.0);
        let before = r.clone();
        for mode in PlotMode::ALL {
            mode.transform()(&r).unwrap();
        }
        filtered_series(&r, 0.5, 1.5, 1).unwrap();
        assert_eq!(r, before);
    }
}
