use std::path::{Path, PathBuf};
use log::info;
use crate::config::ViewerConfig;
use crate::dsp::histogram::{histogram, Histogram};
use crate::dsp::stats::describe;
use crate::dsp::transform::{filtered_series, NamedSeries};
use crate::dsp::{CaptureRecord, SignalError};
use crate::types::{DisplayMode, PlotMode};
/// A decoded capture and where it came from.
#[derive(Clone, Debug)]
pub struct LoadedRecord {
    pub label: String,
    pub path: PathBuf,
    pub record: CaptureRecord,
}
impl LoadedRecord {
    pub fn open(path: &Path) -> Result<Self, SignalError> {
        let record = CaptureRecord::open(path).map_err(|source| SignalError::File {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        Ok(Self::new(path, record))
    }
    pub fn new(path: &Path, record: CaptureRecord) -> Self {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            label,
            path: path.to_path_buf(),
            record,
        }
    }
}
/// Records owned by the caller, grouped into plot views.
pub struct AnalysisSession {
    records: Vec<LoadedRecord>,
    views: Vec<Vec<usize>>,
    display: DisplayMode,
}
impl AnalysisSession {
    /// Decodes every configured file, stopping at the first failure.
    pub fn load(config: &ViewerConfig) -> Result<Self, SignalError> {
        let display = config.display_mode()?;
        let records = config
            .files
            .iter()
            .map(|path| LoadedRecord::open(path))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            "loaded {} capture(s), display {:?}, one window: {}",
            records.len(),
            display,
            config.draw_in_one_window
        );
        Ok(Self::from_records(records, config.draw_in_one_window, display))
    }
    pub fn from_records(
        records: Vec<LoadedRecord>,
        one_window: bool,
        display: DisplayMode,
    ) -> Self {
        let views = if one_window {
            vec![(0..records.len()).collect()]
        } else {
            (0..records.len()).map(|i| vec![i]).collect()
        };
        Self {
            records,
            views,
            display,
        }
    }
    pub fn records(&self) -> &[LoadedRecord] {
        &self.records
    }
    pub fn display(&self) -> DisplayMode {
        self.display
    }
    pub fn view_count(&self) -> usize {
        self.views.len()
    }
    pub fn view_records(&self, view: usize) -> impl Iterator<Item = &LoadedRecord> + '_ {
        self.views
            .get(view)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.records.get(i))
    }
    /// Window title: the record name for single-record views.
    pub fn view_title(&self, view: usize) -> String {
        let labels: Vec<&str> = self.view_records(view).map(|r| r.label.as_str()).collect();
        labels.join(", ")
    }
    /// Summary line, only for views that hold exactly one record.
    pub fn caption(&self, view: usize) -> Option<Result<String, SignalError>> {
        let mut records = self.view_records(view);
        match (records.next(), records.next()) {
            (Some(only), None) => Some(describe(&only.record)),
            _ => None,
        }
    }
    pub fn mode_series(&self, view: usize, mode: PlotMode) -> Result<Vec<NamedSeries>, SignalError> {
        let transform = mode.transform();
        self.view_records(view)
            .map(|r| {
                Ok(NamedSeries {
                    label: r.label.clone(),
                    series: transform(&r.record)?,
                })
            })
            .collect()
    }
    pub fn filtered_series(
        &self,
        view: usize,
        low_hz: f64,
        high_hz: f64,
        order: usize,
    ) -> Result<Vec<NamedSeries>, SignalError> {
        self.view_records(view)
            .map(|r| {
                Ok(NamedSeries {
                    label: r.label.clone(),
                    series: filtered_series(&r.record, low_hz, high_hz, order)?,
                })
            })
            .collect()
    }
    pub fn histograms(
        &self,
        view: usize,
        bins: usize,
    ) -> Result<Vec<(String, Histogram)>, SignalError> {
        self.view_records(view)
            .map(|r| Ok((r.label.clone(), histogram(r.record.samples(), bins)?)))
            .collect()
    }
}
