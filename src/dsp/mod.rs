// src/dsp/mod.rs
// 声明同级目录下的子模块文件
pub mod error;
pub mod fft;
pub mod filter;
pub mod histogram;
pub mod integrate;
pub mod plot;
pub mod record;
pub mod session;
pub mod stats;
pub mod transform;
// 公开导出这些模块里的结构体，方便外部调用
pub use error::SignalError;
pub use fft::{spectrum, FrequencySpectrum};
pub use filter::{bandpass_filter, butter_bandpass, LinearFilter, TransferFunction};
pub use histogram::{histogram, Histogram};
pub use integrate::{cumulative_integral, double_integral, time_axis};
pub use plot::{render_histogram_png, render_series_png, PlotStyle};
pub use record::{CaptureHeader, CaptureRecord, HEADER_LEN};
pub use session::{AnalysisSession, LoadedRecord};
pub use stats::{describe, peak, peak_factor, rms, Summary};
pub use transform::{filtered_series, NamedSeries, Series, TransformFn};
