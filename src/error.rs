use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// Request-level errors for catmood operations.
///
/// Per-part problems (empty regions, analyzer failures) never reach this
/// type; they are absorbed by the orchestrator and show up as absent fields.
#[derive(Debug, Error)]
pub enum CatMoodError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse detections JSON from {path}: {source}")]
    DetectionsJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse analysis result JSON from {path}: {source}")]
    ResultJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write analysis result JSON to {path}: {source}")]
    ResultJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize output: {0}")]
    JsonWrite(#[source] serde_json::Error),

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid analyzer config: {0}")]
    InvalidConfig(String),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Detector failed: {0}")]
    Detector(String),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Nothing to summarize: no result carried an analysis")]
    NothingToSummarize,

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
