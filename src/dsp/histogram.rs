use crate::dsp::SignalError;
/// Equal-width histogram; `edges.len() == counts.len() + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}
impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }
    pub fn centers(&self) -> impl Iterator<Item = f64> + '_ {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1]))
    }
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
/// Bins the samples over their own range. The last bin is closed on the right.
pub fn histogram(samples: &[f32], bin_count: usize) -> Result<Histogram, SignalError> {
    if bin_count == 0 {
        return Err(SignalError::InvalidParameter(
            "histogram needs at least one bin".into(),
        ));
    }
    if samples.is_empty() {
        return Err(SignalError::InvalidParameter(
            "histogram of an empty signal".into(),
        ));
    }
    if samples.iter().any(|v| !v.is_finite()) {
        return Err(SignalError::InvalidParameter(
            "histogram range is undefined for non-finite samples".into(),
        ));
    }
    let (mut lo, mut hi) = samples
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &v| {
            (lo.min(v as f64), hi.max(v as f64))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bin_count as f64;
    let mut edges: Vec<f64> = (0..=bin_count).map(|i| lo + i as f64 * width).collect();
    edges[bin_count] = hi;
    let mut counts = vec![0usize; bin_count];
    for &v in samples {
        let v = v as f64;
        let mut idx = (((v - lo) / width) as usize).min(bin_count - 1);
        // Rounding can put a value one bin off its edges.
        if v < edges[idx] && idx > 0 {
            idx -= 1;
        } else if idx + 1 < bin_count && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }
    Ok(Histogram { edges, counts })
}
