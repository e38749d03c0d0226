//! Command selection and dispatch

use std::path::PathBuf;

use expfactory_validator::Reporter;
use eyre::{Report, Result, eyre};
use thiserror::Error;

use crate::config::Config;

pub mod library;
pub mod validate;

/// A validation failure whose reason the [`Reporter`] has already logged
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ValidationFailed(pub String);

/// What a single invocation asks for, decided from the flags
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Preview,
    Generate {
        experiments: Vec<String>,
        psiturk: bool,
    },
    /// --generate was given without --experiments
    MissingExperiments,
    Run,
    Validate {
        folder: Option<PathBuf>,
    },
    Library {
        path: PathBuf,
    },
    Test,
    Interface,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Preview => "preview",
            Command::Generate { .. } | Command::MissingExperiments => "generate",
            Command::Run => "run",
            Command::Validate { .. } => "validate",
            Command::Library { .. } => "library",
            Command::Test => "test",
            Command::Interface => "interface",
        }
    }
}

/// Handle a command
pub fn handle_command(command: Command, config: &Config, reporter: &Reporter) -> Result<()> {
    reporter.debug(&format!("Dispatching {:?}", command));

    match command {
        Command::Validate { folder } => {
            let folder = folder.or_else(|| config.folder.clone());
            validate::handle(folder, config.survey_repo.clone(), reporter)
        }
        Command::Library { path } => library::handle(&path, reporter),
        Command::MissingExperiments => {
            reporter.info("Please specify list of comma separated experiments with --experiments");
            Ok(())
        }
        other => Err(eyre!(
            "The {} mode builds or serves batteries and is not provided by this toolkit; \
             use --validate or --library",
            other.name()
        )),
    }
}

/// Text to print for a failed invocation, if any
///
/// Quiet runs print nothing, and reasons already logged by the reporter are
/// not repeated.
pub fn failure_message(report: &Report, quiet: bool) -> Option<String> {
    if quiet || report.downcast_ref::<ValidationFailed>().is_some() {
        return None;
    }
    Some(format!("{:?}", report))
}
