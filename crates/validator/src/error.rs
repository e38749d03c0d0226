use std::path::PathBuf;

use thiserror::Error;

/// Reasons a library entry file is rejected, in pipeline order.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("{} does not have a .json extension", .0.display())]
    Extension(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} does not match the library entry layout: {source}", .path.display())]
    Layout {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} must contain a JSON object", .0.display())]
    NotAMapping(PathBuf),

    #[error("\"{field}\" not found in {context}")]
    MissingField { field: String, context: String },

    #[error("\"{field}\" must be a string in {context}")]
    FieldType { field: String, context: String },

    #[error("invalid characters in {0}, only lowercase, digits and \"_\" allowed.")]
    NameFormat(String),

    #[error("{0} must be a string")]
    GithubType(String),

    #[error("{0} is not a valid URL.")]
    GithubUrl(String),

    #[error("\"maintainers\" must be list in {0}")]
    MaintainersType(String),

    #[error("\"maintainers\" must not be empty in {0}")]
    EmptyMaintainers(String),

    #[error("{maintainer} must be a dict in {context}")]
    MaintainerShape { maintainer: String, context: String },

    #[error("{handle} must start with @ for {context}")]
    MaintainerGithubPrefix { handle: String, context: String },

    #[error("{0} is not a valid email.")]
    MaintainerEmailFormat(String),
}

impl LibraryError {
    pub(crate) fn missing(field: &str, context: &str) -> Self {
        LibraryError::MissingField {
            field: field.to_string(),
            context: context.to_string(),
        }
    }

    pub(crate) fn field_type(field: &str, context: &str) -> Self {
        LibraryError::FieldType {
            field: field.to_string(),
            context: context.to_string(),
        }
    }

    /// Whether the failure happened before any content rule ran
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            LibraryError::Extension(_)
                | LibraryError::Read { .. }
                | LibraryError::Parse { .. }
                | LibraryError::NotAMapping(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error("Experiment folder '{}' does not exist", .0.display())]
    FolderNotFound(PathBuf),

    #[error("Missing config.json in '{}'", .0.display())]
    MissingConfig(PathBuf),

    #[error("IO operation '{operation}' failed on path '{}': {source}", .path.display())]
    IoOperation {
        operation: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config at '{}': {source}", .path.display())]
    InvalidConfigFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("config.json in '{}' must hold a non-empty list of experiments", .0.display())]
    EmptyConfig(PathBuf),

    #[error("Invalid experiment '{exp_id}': {reason}")]
    InvalidRecord { exp_id: String, reason: String },

    #[error("Asset '{asset}' for experiment '{exp_id}' must be inside the experiment folder")]
    AssetOutsideFolder { exp_id: String, asset: String },

    #[error("Missing asset '{asset}' for experiment '{exp_id}'")]
    MissingAsset { exp_id: String, asset: String },
}

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Missing survey.tsv at '{}'", .0.display())]
    MissingTable(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("survey.tsv for '{0}' has no questions")]
    Empty(String),

    #[error("survey.tsv for '{exp_id}' is missing column '{column}'")]
    MissingColumn { exp_id: String, column: String },

    #[error("survey.tsv for '{exp_id}', line {line}: {reason}")]
    InvalidRow {
        exp_id: String,
        line: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, LibraryError>;
