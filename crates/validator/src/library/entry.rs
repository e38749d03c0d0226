use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{LibraryError, Result};

/// A library entry that passed every content rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    pub github: String,
    pub maintainers: Vec<Maintainer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LibraryEntry {
    /// Type a record loaded from `path`
    pub fn from_record(path: &Path, record: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(record)).map_err(|source| LibraryError::Layout {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    pub email: String,
    pub github: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Maintainer {
    /// Handle without the leading `@`
    pub fn handle(&self) -> &str {
        self.github.trim_start_matches('@')
    }
}

/// Outcome of a single pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub reason: Option<String>,
}

impl ValidationOutcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: Some(reason.into()),
        }
    }
}
