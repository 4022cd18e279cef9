use std::path::PathBuf;
use thiserror::Error;

/// The main error type for coco2yolo operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse COCO JSON from {path}: {source}")]
    CocoJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse class names from {path}: {source}")]
    ClassesYamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid classes file {path}: {message}")]
    ClassesFileInvalid { path: PathBuf, message: String },

    #[error("Invalid class list: {0}")]
    InvalidClassList(String),

    #[error("No class names given (use --class, --classes or --classes-file)")]
    EmptyClassList,

    #[error("Output directory does not exist: {path}")]
    OutputDirMissing { path: PathBuf },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to render report as JSON: {0}")]
    ReportJson(#[source] serde_json::Error),

    #[error("{failed} label file(s) could not be written")]
    WriteFailed { failed: usize },
}
