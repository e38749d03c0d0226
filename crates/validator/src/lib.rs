//! Validation for expfactory experiment metadata
//!
//! This crate decides whether experiment metadata can be trusted before it is
//! assembled into a battery. It includes:
//!
//! - **Library entries**: the [`LibraryValidator`] pipeline checks a single
//!   library entry JSON file (extension, parseability, then name, repository
//!   URL and maintainer rules) and stops at the first failure
//! - **Experiment folders**: the [`ExperimentValidator`] checks a folder's
//!   `config.json` and the assets it references
//! - **Surveys**: [`validate_survey_table`] checks a survey's `survey.tsv`
//!
//! All validators are synchronous and read-only. Narration goes through an
//! injected [`Reporter`]; a quiet reporter never changes a result.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use expfactory_validator::{LibraryValidator, Reporter};
//!
//! let validator = LibraryValidator::new(Reporter::quiet());
//! if validator.validate_all(Path::new("library/stroop.json")) {
//!     println!("stroop can be added to the library");
//! }
//! ```

pub mod error;
pub mod experiment;
pub mod library;
pub mod reporter;
pub mod survey;

pub use error::{ExperimentError, LibraryError, Result, SurveyError};
pub use experiment::{ExperimentRecord, ExperimentValidator, load_experiment};
pub use library::{
    LibraryEntry, LibraryReport, LibraryValidator, Maintainer, ValidationOutcome,
};
pub use reporter::{Reporter, Severity};
pub use survey::{SurveySummary, validate_survey_table};
