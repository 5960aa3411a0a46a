//! Reader for Landsat `_MTL.txt` metadata files.
//!
//! The file is a sequence of `KEY = "VALUE"` lines grouped by `GROUP = ...`
//! markers. Lookups match the first line that *contains* the key, so a key
//! that is a substring of an earlier key in the same file resolves to the
//! wrong line. Provider key names avoid this in practice; callers must keep
//! requested keys unambiguous.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Metadata file contents held in memory for repeated lookups
#[derive(Debug, Clone)]
pub struct MetadataFile {
    path: PathBuf,
    contents: String,
}

impl MetadataFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path).map_err(|source| Error::FileAccess {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, contents })
    }

    /// Build from in-memory text; `path` is used for error reporting and
    /// band path resolution only.
    pub fn from_contents<P: AsRef<Path>>(path: P, contents: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the metadata file; band file names are relative to it.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Value after the first `=` on the first line containing `key`,
    /// with surrounding whitespace and quotes stripped.
    pub fn lookup(&self, key: &str) -> Result<&str> {
        self.contents
            .lines()
            .find(|line| line.contains(key))
            .map(extract_value)
            .ok_or_else(|| Error::MissingParameter {
                key: key.to_string(),
                path: self.path.clone(),
            })
    }

    pub fn lookup_f64(&self, key: &str) -> Result<f64> {
        let value = self.lookup(key)?;
        value
            .parse::<f64>()
            .map_err(|e| Error::invalid(key, value, e))
    }
}

/// One-shot lookup that reads the file on every call.
pub fn lookup<P: AsRef<Path>>(path: P, key: &str) -> Result<String> {
    MetadataFile::open(path)?.lookup(key).map(str::to_string)
}

fn extract_value(line: &str) -> &str {
    let value = match line.split_once('=') {
        Some((_, rest)) => rest,
        // no separator: the whole line is the value
        None => line,
    };
    value.trim_matches(|c: char| c.is_whitespace() || c == '"')
}
