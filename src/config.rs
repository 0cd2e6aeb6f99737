use std::fs;
use std::path::{Path, PathBuf};
use log::warn;
use serde::{Deserialize, Serialize};
use crate::dsp::SignalError;
use crate::types::DisplayMode;
/// Histogram bin count used when the configured value is missing or not positive.
pub const DEFAULT_BINS: usize = 4;
/// Filter order used when the configuration does not name one.
pub const DEFAULT_FILTER_ORDER: usize = 1;
/// Viewer configuration, read from a JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub files: Vec<PathBuf>,
    #[serde(default = "default_one_window")]
    pub draw_in_one_window: bool,
    #[serde(default)]
    pub filter: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub order: Option<usize>,
    #[serde(default)]
    pub distr: bool,
    #[serde(default)]
    pub bins: Option<i64>,
}
fn default_one_window() -> bool {
    true
}
impl ViewerConfig {
    /// Loads the file; relative capture paths resolve against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SignalError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_json(&text)?;
        if let Some(base) = path.parent() {
            for file in &mut config.files {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }
        Ok(config)
    }
    pub fn from_json(text: &str) -> Result<Self, SignalError> {
        let config: Self = serde_json::from_str(text)?;
        if config.files.is_empty() {
            return Err(SignalError::Config("no capture files listed".into()));
        }
        Ok(config)
    }
    /// Resolves the display flags. `filter` wins over `distr`.
    pub fn display_mode(&self) -> Result<DisplayMode, SignalError> {
        if self.filter {
            let (Some(low_hz), Some(high_hz)) = (self.min, self.max) else {
                return Err(SignalError::Config(
                    "filter needs both `min` and `max`".into(),
                ));
            };
            if low_hz >= high_hz {
                return Err(SignalError::Config(format!(
                    "filter min ({low_hz}) must be below max ({high_hz})"
                )));
            }
            let order = self.order.unwrap_or(DEFAULT_FILTER_ORDER);
            if order == 0 {
                return Err(SignalError::Config("filter order must be at least 1".into()));
            }
            return Ok(DisplayMode::Filtered {
                low_hz,
                high_hz,
                order,
            });
        }
        if self.distr {
            let bins = match self.bins {
                Some(b) if b > 0 => b as usize,
                other => {
                    warn!("histogram bins {other:?} not usable, using {DEFAULT_BINS}");
                    DEFAULT_BINS
                }
            };
            return Ok(DisplayMode::Histogram { bins });
        }
        Ok(DisplayMode::Interactive)
    }
}
