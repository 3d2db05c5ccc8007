//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, CSV and JSON errors, and provides semantic variants
//! for missing columns, configuration problems and validation failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column `{column}` in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Reference data error in {table}: {message}")]
    ReferenceData { table: &'static str, message: String },

    #[error("Coordinate validation failed: {0}")]
    Validation(String),

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn write<E>(path: impl Into<PathBuf>, e: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Write {
            path: path.into(),
            source: std::io::Error::other(e),
        }
    }
}
