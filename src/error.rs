//! Error types surfaced at the library boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of a single file's conversion.
///
/// Soft failures (context extraction aborts, unmapped assertions) never show
/// up here; they are reported as diagnostics and the conversion continues.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Failed to print converted source: {0}")]
    Print(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
