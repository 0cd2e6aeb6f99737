use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("malformed capture record: {0}")]
    MalformedRecord(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("rms of the signal is zero; peak factor is undefined")]
    ZeroRms,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<SignalError>,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl From<serde_json::Error> for SignalError {
    fn from(value: serde_json::Error) -> Self {
        SignalError::Config(value.to_string())
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for SignalError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        SignalError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for SignalError {
    fn from(value: image::ImageError) -> Self {
        SignalError::Plot(value.to_string())
    }
}
