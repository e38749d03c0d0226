//! Command line front end for expfactory validation
//!
//! The `expfactory` binary keeps the flag surface of the experiment factory
//! and dispatches the validation paths:
//!
//! - `--validate`: check an experiment folder's `config.json`, plus its
//!   `survey.tsv` when the experiment is a survey
//! - `--library`: check one library entry file, or every entry in a folder
//!
//! Battery generation, previews and the experiment robot are not part of
//! this toolkit; selecting them reports an error.
//!
//! ```rust,no_run
//! use expfactory_cli::commands::{Command, handle_command};
//! use expfactory_cli::config::Config;
//! use expfactory_validator::Reporter;
//!
//! # fn example() -> eyre::Result<()> {
//! let cmd = Command::Library {
//!     path: "library/stroop.json".into(),
//! };
//! handle_command(cmd, &Config::default(), &Reporter::default())?;
//! # Ok(())
//! # }
//! ```

pub use commands::{Command, ValidationFailed, failure_message, handle_command};

pub mod cli;
pub mod commands;
pub mod config;
pub mod utils;
