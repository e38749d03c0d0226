//! Experiment folder validation command

use std::path::PathBuf;

use expfactory_validator::{ExperimentValidator, Reporter, validate_survey_table};
use eyre::{Result, eyre};

use super::ValidationFailed;
use crate::utils::{resolve_folder, survey_repo_for};

/// Validate an experiment folder, and its survey table for survey templates
pub fn handle(
    folder: Option<PathBuf>,
    survey_repo: Option<PathBuf>,
    reporter: &Reporter,
) -> Result<()> {
    let folder = resolve_folder(folder)?;
    reporter.info(&format!("Validating experiment folder {}", folder.display()));

    let validator = ExperimentValidator::new(*reporter);
    // Validator errors are logged as they happen
    let records = validator
        .validate_folder(&folder)
        .map_err(|e| ValidationFailed(e.to_string()))?;

    let experiment = records
        .first()
        .ok_or_else(|| eyre!("No experiments found in {}", folder.display()))?;

    if experiment.is_survey() {
        reporter.debug("Validating survey.tsv...");
        let survey_repo = match survey_repo {
            Some(repo) => repo,
            None => survey_repo_for(&folder)?,
        };
        let summary = validate_survey_table(&experiment.exp_id, &survey_repo, reporter)
            .map_err(|e| ValidationFailed(e.to_string()))?;
        reporter.info(&format!(
            "Survey '{}' has {} questions on {} pages",
            summary.exp_id, summary.questions, summary.pages
        ));
    }

    reporter.info(&format!(
        "Success: {} passed all validation checks",
        experiment.exp_id
    ));
    Ok(())
}
