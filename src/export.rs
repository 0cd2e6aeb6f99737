// src/export.rs
// 无界面模式：把每个视图渲染成 PNG 文件
use std::fs;
use std::path::{Path, PathBuf};
use log::info;
use crate::dsp::{render_histogram_png, render_series_png, AnalysisSession, PlotStyle, SignalError};
use crate::types::{DisplayMode, PlotMode};

/// Writes the PNGs for every view into `dir`, returning the written paths.
pub fn export_session(
    session: &AnalysisSession,
    dir: &Path,
    style: &PlotStyle,
) -> Result<Vec<PathBuf>, SignalError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for view in 0..session.view_count() {
        let title = match session.caption(view) {
            Some(Ok(caption)) => caption,
            _ => session.view_title(view),
        };
        match session.display() {
            DisplayMode::Interactive => {
                for mode in PlotMode::ALL {
                    let series = session.mode_series(view, mode)?;
                    let png = render_series_png(&title, mode.x_label(), mode.y_label(), &series, style)?;
                    written.push(write_png(dir, view, mode.label(), &png)?);
                }
            }
            DisplayMode::Filtered { low_hz, high_hz, order } => {
                let series = session.filtered_series(view, low_hz, high_hz, order)?;
                let png = render_series_png(&title, "time (s)", "", &series, style)?;
                written.push(write_png(dir, view, "filtered", &png)?);
            }
            DisplayMode::Histogram { bins } => {
                let hists = session.histograms(view, bins)?;
                let png = render_histogram_png(&title, &hists, style)?;
                written.push(write_png(dir, view, "histogram", &png)?);
            }
        }
    }
    info!("exported {} plot(s) to {}", written.len(), dir.display());
    Ok(written)
}

fn write_png(dir: &Path, view: usize, kind: &str, png: &[u8]) -> Result<PathBuf, SignalError> {
    let path = dir.join(format!("view{view}_{kind}.png"));
    fs::write(&path, png)?;
    Ok(path)
}
