//! Crate-level error type and `Result` alias.
//! Covers sensor selection, metadata access and parsing, the GDAL raster
//! collaborator, and shape checks between grids combined element-wise.
use std::path::PathBuf;
use thiserror::Error;

use crate::io::GdalError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported sensor: {0}. Expected one of Landsat_4, Landsat_5, Landsat_7, Landsat_8")]
    UnsupportedSensor(String),

    #[error("Cannot open file {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parameter {key} not found in metadata file {path:?}")]
    MissingParameter { key: String, path: PathBuf },

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidParameter {
        key: String,
        value: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(GdalError),

    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<GdalError> for Error {
    fn from(e: GdalError) -> Self {
        match e {
            GdalError::Open { path, source } => Error::FileAccess {
                path,
                source: std::io::Error::other(source.to_string()),
            },
            other => Error::Gdal(other),
        }
    }
}

impl Error {
    pub(crate) fn invalid<E: std::fmt::Display>(key: &str, value: &str, reason: E) -> Self {
        Error::InvalidParameter {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
