//! Library entry validation pipeline
//!
//! A library entry file is admitted only if it passes, in order, the
//! extension check, the load check and every content rule. The first
//! failing stage ends the run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{LibraryError, Result};
use crate::reporter::Reporter;

pub mod entry;
pub mod loader;
pub mod rules;

pub use entry::{LibraryEntry, Maintainer, ValidationOutcome};
pub use loader::{LibraryEntryRecord, check_extension, load};
pub use rules::{ContentRule, default_rules};

/// Validates library entry JSON files
pub struct LibraryValidator {
    reporter: Reporter,
    rules: Vec<Box<dyn ContentRule>>,
}

impl LibraryValidator {
    pub fn new(reporter: Reporter) -> Self {
        Self {
            reporter,
            rules: default_rules(),
        }
    }

    /// Shorthand for a validator that prints nothing when `quiet` is set
    pub fn with_quiet(quiet: bool) -> Self {
        Self::new(Reporter::from_quiet(quiet))
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Run every stage and report whether the file is admissible
    pub fn validate_all(&self, path: &Path) -> bool {
        self.outcome(path).passed
    }

    /// Like [`validate_all`](Self::validate_all), keeping the failure reason
    pub fn outcome(&self, path: &Path) -> ValidationOutcome {
        match self.check(path) {
            Ok(_) => ValidationOutcome::pass(),
            Err(e) => {
                let reason = e.to_string();
                self.reporter.failure(&reason);
                ValidationOutcome::fail(reason)
            }
        }
    }

    /// Run every stage, returning the typed entry or the first failure
    pub fn check(&self, path: &Path) -> Result<LibraryEntry> {
        if !self.validate_extension(path) {
            return Err(LibraryError::Extension(path.to_path_buf()));
        }
        let record = self.validate_loading(path)?;
        self.validate_content(path, &record)?;

        LibraryEntry::from_record(path, record)
    }

    pub fn validate_extension(&self, path: &Path) -> bool {
        self.reporter
            .test(&format!("EXTENSION: Experiment {}", loader::basename(path)));
        check_extension(path)
    }

    pub fn validate_loading(&self, path: &Path) -> Result<LibraryEntryRecord> {
        self.reporter
            .test(&format!("LOADING: Experiment {}", loader::basename(path)));
        load(path)
    }

    pub fn validate_content(&self, path: &Path, record: &LibraryEntryRecord) -> Result<()> {
        let name = loader::basename(path);
        self.reporter.test(&format!("CONTENT: Experiment {}", name));

        self.rules.iter().try_for_each(|rule| {
            self.reporter.test(&format!("        {}", rule.rule_name()));
            rule.check(record, &name)
        })
    }

    /// Validate every `*.json` file directly inside `dir`, in file name order
    pub fn validate_library(&self, dir: &Path) -> LibraryReport {
        let mut unreadable = Vec::new();
        let files: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    let reason = format!("Cannot read library entry in {}: {}", dir.display(), e);
                    self.reporter.warning(&reason);
                    unreadable.push(reason);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| check_extension(path))
            .collect();

        let results = files
            .into_iter()
            .map(|path| {
                let outcome = self.outcome(&path);
                FileOutcome { path, outcome }
            })
            .collect::<Vec<_>>();

        let report = LibraryReport {
            results,
            unreadable,
        };
        self.reporter.info(&format!(
            "{} of {} library entries passed in {}",
            report.passed_count(),
            report.results.len(),
            dir.display()
        ));
        report
    }
}

impl Default for LibraryValidator {
    fn default() -> Self {
        Self::new(Reporter::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub outcome: ValidationOutcome,
}

/// Per-file results of a library directory run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryReport {
    pub results: Vec<FileOutcome>,
    /// Directory entries that could not be listed
    #[serde(default)]
    pub unreadable: Vec<String>,
}

impl LibraryReport {
    pub fn passed(&self) -> bool {
        self.unreadable.is_empty() && self.results.iter().all(|r| r.outcome.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.passed).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.results.iter().filter(|r| !r.outcome.passed)
    }
}
