use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("No files match pattern '{pattern}'")]
    NoMatchingFiles { pattern: String },

    #[error("Invalid data format in {path} at line {line}: {message}")]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Requested {days} days from {start} fall outside the table ({first} to {last})")]
    OutOfRange {
        start: NaiveDate,
        days: usize,
        first: NaiveDate,
        last: NaiveDate,
    },

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Summary serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
