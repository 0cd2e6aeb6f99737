use std::io::Cursor;
use std::ops::Range;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::dsp::error::SignalError;
use crate::dsp::histogram::Histogram;
use crate::dsp::transform::NamedSeries;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            palette: vec![BLUE, RED, GREEN, CYAN, MAGENTA, YELLOW, WHITE],
        }
    }
}
/// Line chart of one or more series, encoded as PNG.
pub fn render_series_png(
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[NamedSeries],
    style: &PlotStyle,
) -> Result<Vec<u8>, SignalError> {
    if series.iter().all(|s| s.series.is_empty()) {
        return Err(SignalError::Plot("nothing to plot".into()));
    }
    let bounds = series
        .iter()
        .filter_map(|s| s.series.bounds())
        .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1), a.2.min(b.2), a.3.max(b.3)))
        .ok_or_else(|| SignalError::Plot("series has no finite values".into()))?;
    let x_range = padded(bounds.0, bounds.1, 0.0);
    let y_range = padded(bounds.2, bounds.3, 0.05);
    if !(range_is_finite(&x_range) && range_is_finite(&y_range)) {
        return Err(SignalError::Plot(format!(
            "series span {:e}..{:e} is too wide to plot",
            bounds.2, bounds.3
        )));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(title, ("sans-serif", 20).into_font().color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_range, y_range)?;
        chart
            .configure_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .axis_desc_style(("sans-serif", 14).into_font().color(&WHITE))
            .label_style(("sans-serif", 12).into_font().color(&WHITE))
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        for (idx, named) in series.iter().enumerate() {
            let color = style.palette[idx % style.palette.len()];
            let runs = named.series.finite_runs();
            chart
                .draw_series(runs.into_iter().map(|run| PathElement::new(run, color)))?
                .label(named.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
        chart
            .configure_series_labels()
            .border_style(&WHITE.mix(0.2))
            .background_style(&style.background)
            .label_font(("sans-serif", 12).into_font().color(&WHITE))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Bar chart of per-record histograms, overlaid and translucent.
pub fn render_histogram_png(
    title: &str,
    histograms: &[(String, Histogram)],
    style: &PlotStyle,
) -> Result<Vec<u8>, SignalError> {
    let (x0, x1, top) = histograms
        .iter()
        .filter_map(|(_, h)| {
            let first = *h.edges.first()?;
            let last = *h.edges.last()?;
            let top = h.counts.iter().copied().max().unwrap_or(0);
            Some((first, last, top))
        })
        .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1), a.2.max(b.2)))
        .ok_or_else(|| SignalError::Plot("no histogram bins".into()))?;
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(title, ("sans-serif", 20).into_font().color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Left, 45)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(padded(x0, x1, 0.0), 0f64..(top.max(1) as f64 * 1.05))?;
        chart
            .configure_mesh()
            .y_desc("count")
            .axis_desc_style(("sans-serif", 14).into_font().color(&WHITE))
            .label_style(("sans-serif", 12).into_font().color(&WHITE))
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        for (idx, (label, hist)) in histograms.iter().enumerate() {
            let color = style.palette[idx % style.palette.len()];
            let bars = hist
                .edges
                .windows(2)
                .zip(&hist.counts)
                .map(|(edge, &count)| {
                    Rectangle::new([(edge[0], 0.0), (edge[1], count as f64)], color.mix(0.5).filled())
                });
            chart
                .draw_series(bars)?
                .label(label.clone())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.mix(0.5).filled())
                });
        }
        chart
            .configure_series_labels()
            .border_style(&WHITE.mix(0.2))
            .background_style(&style.background)
            .label_font(("sans-serif", 12).into_font().color(&WHITE))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Axis range with relative headroom; flat data gets a unit span.
fn padded(lo: f64, hi: f64, margin: f64) -> Range<f64> {
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = (hi - lo) * margin;
    (lo - pad)..(hi + pad)
}
fn range_is_finite(range: &Range<f64>) -> bool {
    range.start.is_finite() && range.end.is_finite()
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, SignalError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| SignalError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::filter::bandpass_filter;
    use crate::dsp::histogram::histogram;
    use crate::dsp::transform::Series;
    use crate::dsp::record::tests::record;
    use crate::types::PlotMode;
    const PNG_MAGIC: &[u8] = b"\x89PNG";
    #[test]
    fn every_mode_renders_png() {
        let r = record((0..128).map(|i| (i as f32 * 0.1).sin()).collect(), 1.0, 1.0, -1.0);
        for mode in PlotMode::ALL {
            let series = vec![NamedSeries {
                label: "cap.bin".into(),
                series: mode.transform()(&r).unwrap(),
            }];
            let png = render_series_png(mode.label(), mode.x_label(), mode.y_label(), &series, &PlotStyle::default())
                .unwrap();
            assert!(png.starts_with(PNG_MAGIC));
        }
    }
    #[test]
    fn histogram_renders_png() {
        let h = histogram(&[0.0, 1.0, 1.0, 2.0, 3.0], 4).unwrap();
        let png = render_histogram_png("hist", &[("cap.bin".into(), h)], &PlotStyle::default()).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }
    #[test]
    fn empty_input_is_a_plot_error() {
        assert!(matches!(
            render_series_png("t", "x", "y", &[], &PlotStyle::default()),
            Err(SignalError::Plot(_))
        ));
        assert!(matches!(
            render_histogram_png("t", &[], &PlotStyle::default()),
            Err(SignalError::Plot(_))
        ));
    }
    #[test]
    fn non_finite_series_render_or_fail_fast() {
        let named = |y: Vec<f64>| NamedSeries {
            label: "cap.bin".into(),
            series: Series::new((0..y.len()).map(|i| i as f64).collect(), y),
        };
        let style = PlotStyle::default();
        for y in [
            vec![f64::NAN, f64::NAN, f64::NAN],
            vec![f64::INFINITY, f64::NEG_INFINITY],
            vec![f64::MAX, f64::MIN],
        ] {
            assert!(matches!(
                render_series_png("t", "x", "y", &[named(y)], &style),
                Err(SignalError::Plot(_))
            ));
        }
        // Finite points around a blow-up still produce an image.
        let png = render_series_png("t", "x", "y", &[named(vec![0.0, f64::INFINITY, 1.0])], &style)
            .unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }
    #[test]
    fn unstable_filter_output_does_not_hang_export() {
        let samples: Vec<f32> = (0..5000)
            .map(|i| (2.0 * std::f32::consts::PI * 1.5 * i as f32 / 1000.0).sin())
            .collect();
        let y = bandpass_filter(&samples, 1.0, 2.0, 1000.0, 10).unwrap();
        let series = NamedSeries {
            label: "cap.bin".into(),
            series: Series::new((0..y.len()).map(|i| i as f64 / 1000.0).collect(), y),
        };
        match render_series_png("t", "x", "y", &[series], &PlotStyle::default()) {
            Ok(png) => assert!(png.starts_with(PNG_MAGIC)),
            Err(e) => assert!(matches!(e, SignalError::Plot(_))),
        }
    }
}
