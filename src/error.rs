use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unsupported repository URL format: {0}")]
    UnsupportedFormat(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API request to {url} failed with status {status}")]
    Api { status: u16, url: String },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Config error in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
    #[error("Cannot look back {0} days: the window would start before the earliest supported date")]
    DaysOutOfRange(u32),
    #[error("No commits found in the specified repositories and time range")]
    NoData,
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub fn config<P: Into<PathBuf>>(path: P, reason: impl Into<String>) -> Self {
        ReportError::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
