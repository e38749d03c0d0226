//! Folder-level validation of experiment `config.json` files

use std::fs;
use std::path::{Component, Path};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::ExperimentError;
use crate::reporter::Reporter;

pub const CONFIG_FILE: &str = "config.json";

static EXP_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid exp_id pattern"));

const REQUIRED_FIELDS: [&str; 4] = ["exp_id", "name", "template", "run"];

/// One experiment described by a folder's `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub exp_id: String,
    pub name: String,
    pub template: String,
    pub run: Vec<String>,
    /// Expected duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExperimentRecord {
    pub fn is_survey(&self) -> bool {
        self.template == "survey"
    }
}

type Result<T> = std::result::Result<T, ExperimentError>;

fn read_config(folder: &Path) -> Result<Vec<Value>> {
    if !folder.is_dir() {
        return Err(ExperimentError::FolderNotFound(folder.to_path_buf()));
    }

    let path = folder.join(CONFIG_FILE);
    if !path.exists() {
        return Err(ExperimentError::MissingConfig(folder.to_path_buf()));
    }

    let content = fs::read_to_string(&path).map_err(|source| ExperimentError::IoOperation {
        operation: "read".to_string(),
        path: path.clone(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|source| ExperimentError::InvalidConfigFile { path, source })?;

    let records = match value {
        Value::Array(records) => records,
        record @ Value::Object(_) => vec![record],
        _ => Vec::new(),
    };

    if records.is_empty() {
        return Err(ExperimentError::EmptyConfig(folder.to_path_buf()));
    }
    Ok(records)
}

/// Parse a folder's `config.json` without checking its rules
pub fn load_experiment(folder: &Path) -> Result<Vec<ExperimentRecord>> {
    let path = folder.join(CONFIG_FILE);
    read_config(folder)?
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|source| ExperimentError::InvalidConfigFile {
                path: path.clone(),
                source,
            })
        })
        .collect()
}

/// Checks experiment folders before they are bundled into a battery
pub struct ExperimentValidator {
    reporter: Reporter,
}

impl ExperimentValidator {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    pub fn with_quiet(quiet: bool) -> Self {
        Self::new(Reporter::from_quiet(quiet))
    }

    /// Validate every record of `folder/config.json`, returning them in file order
    pub fn validate_folder(&self, folder: &Path) -> Result<Vec<ExperimentRecord>> {
        let folder_name = folder
            .canonicalize()
            .ok()
            .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();
        self.reporter
            .test(&format!("FOLDER: Experiment {}", folder_name));

        let result = read_config(folder).and_then(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| self.validate_record(folder, &folder_name, index, value))
                .collect::<Result<Vec<_>>>()
        });

        if let Err(e) = &result {
            self.reporter.failure(&e.to_string());
        }
        result
    }

    fn validate_record(
        &self,
        folder: &Path,
        folder_name: &str,
        index: usize,
        value: Value,
    ) -> Result<ExperimentRecord> {
        let fields = value.as_object().ok_or_else(|| ExperimentError::InvalidRecord {
            exp_id: format!("#{}", index),
            reason: "each entry in config.json must be an object".to_string(),
        })?;

        let label = fields
            .get("exp_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index));
        let invalid = |reason: String| ExperimentError::InvalidRecord {
            exp_id: label.clone(),
            reason,
        };

        for field in REQUIRED_FIELDS {
            if !fields.contains_key(field) {
                return Err(invalid(format!("missing field '{}'", field)));
            }
        }

        self.reporter.test("        exp_id");
        let exp_id = fields["exp_id"]
            .as_str()
            .ok_or_else(|| invalid("exp_id must be a string".to_string()))?;
        if !EXP_ID_PATTERN.is_match(exp_id) {
            return Err(invalid(
                "exp_id may only contain lowercase letters, digits, '_' and '-'".to_string(),
            ));
        }
        if exp_id != folder_name {
            return Err(invalid(format!(
                "exp_id must match folder name '{}'",
                folder_name
            )));
        }

        self.reporter.test("        template");
        match fields["template"].as_str() {
            Some(template) if !template.trim().is_empty() => {}
            _ => return Err(invalid("template must be a non-empty string".to_string())),
        }

        if let Some(time) = fields.get("time") {
            if time.as_u64().is_none() {
                return Err(invalid(
                    "time must be a non-negative whole number of minutes".to_string(),
                ));
            }
        }

        self.reporter.test("        run");
        let run = fields["run"]
            .as_array()
            .filter(|run| !run.is_empty())
            .ok_or_else(|| invalid("run must be a non-empty list of files".to_string()))?;
        for asset in run {
            let asset = asset
                .as_str()
                .ok_or_else(|| invalid("run entries must be strings".to_string()))?;
            if is_remote(asset) {
                continue;
            }
            if !is_contained(folder, asset) {
                return Err(ExperimentError::AssetOutsideFolder {
                    exp_id: exp_id.to_string(),
                    asset: asset.to_string(),
                });
            }
            if !folder.join(asset).is_file() {
                return Err(ExperimentError::MissingAsset {
                    exp_id: exp_id.to_string(),
                    asset: asset.to_string(),
                });
            }
        }

        serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
    }
}

impl Default for ExperimentValidator {
    fn default() -> Self {
        Self::new(Reporter::default())
    }
}

fn is_remote(asset: &str) -> bool {
    Url::parse(asset)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Relative paths only, never climbing out of `folder`, symlinks included
fn is_contained(folder: &Path, asset: &str) -> bool {
    let relative = Path::new(asset);
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
    {
        return false;
    }

    match (folder.canonicalize(), folder.join(relative).canonicalize()) {
        (Ok(root), Ok(path)) => path.starts_with(root),
        // Missing files are reported separately
        _ => true,
    }
}
