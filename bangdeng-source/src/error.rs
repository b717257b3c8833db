use std::path::PathBuf;

/// Errors that can occur while reading facility sources.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Overpass returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-record normalization failures. The record is skipped; processing
/// continues with the next one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("{at}: {field} is empty")]
    MissingCoordinate { at: String, field: &'static str },

    #[error("{at}: {field} is not a number ('{value}')")]
    BadCoordinate {
        at: String,
        field: &'static str,
        value: String,
    },

    #[error("{at}: coordinates out of range (lat {lat}, lng {lng})")]
    OutOfRange { at: String, lat: f64, lng: f64 },
}

impl NormalizeError {
    /// Where the bad record came from (`row 12`, `node/4431`).
    pub fn location(&self) -> &str {
        match self {
            Self::MissingCoordinate { at, .. }
            | Self::BadCoordinate { at, .. }
            | Self::OutOfRange { at, .. } => at,
        }
    }
}
