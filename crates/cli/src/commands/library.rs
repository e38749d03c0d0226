//! Library entry validation command

use std::path::Path;

use expfactory_validator::{LibraryValidator, Reporter};
use eyre::{Result, eyre};

use super::ValidationFailed;

/// Validate one library entry file, or every `*.json` entry of a directory
pub fn handle(path: &Path, reporter: &Reporter) -> Result<()> {
    let validator = LibraryValidator::new(*reporter);

    if path.is_dir() {
        let report = validator.validate_library(path);
        if report.results.is_empty() {
            return Err(eyre!("No library entries found in {}", path.display()));
        }
        if !report.passed() {
            let failed: Vec<String> = report
                .failures()
                .map(|failure| failure.path.display().to_string())
                .collect();
            let summary = if report.unreadable.is_empty() {
                format!(
                    "{} library entries failed validation: {}",
                    failed.len(),
                    failed.join(", ")
                )
            } else {
                format!(
                    "{} library entries failed validation and {} could not be read in {}",
                    failed.len(),
                    report.unreadable.len(),
                    path.display()
                )
            };
            reporter.failure(&summary);
            return Err(ValidationFailed(summary).into());
        }
        return Ok(());
    }

    let outcome = validator.outcome(path);
    if outcome.passed {
        reporter.info(&format!("{} is a valid library entry", path.display()));
        Ok(())
    } else {
        // The reason was logged by the validator
        Err(ValidationFailed(format!("{} failed validation", path.display())).into())
    }
}
