use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{AtmosphericCorrection, Sensor};

/// Processing parameters suitable for JSON run files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingParams {
    /// Path to the scene's `_MTL.txt`
    pub metadata_path: PathBuf,
    pub sensor: Sensor,
    #[serde(default)]
    pub atmospheric_correction: AtmosphericCorrection,
}

impl ProcessingParams {
    pub fn new<P: Into<PathBuf>>(metadata_path: P, sensor: Sensor, dos_required: bool) -> Self {
        Self {
            metadata_path: metadata_path.into(),
            sensor,
            atmospheric_correction: dos_required.into(),
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }
}
