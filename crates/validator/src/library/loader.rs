//! Reading library entry files from disk

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{LibraryError, Result};

/// Parsed top-level object of a library entry file
pub type LibraryEntryRecord = Map<String, Value>;

/// True iff the path ends with `.json`. Performs no I/O.
pub fn check_extension(path: &Path) -> bool {
    path.to_string_lossy().ends_with(".json")
}

/// Read and parse a library entry, requiring a JSON object at the top level
pub fn load(path: &Path) -> Result<LibraryEntryRecord> {
    let content = fs::read_to_string(path).map_err(|source| LibraryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| LibraryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(record) => Ok(record),
        _ => Err(LibraryError::NotAMapping(path.to_path_buf())),
    }
}

/// File name used in narration and diagnostics
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
