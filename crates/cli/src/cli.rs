use std::path::PathBuf;

use crate::commands::Command;

#[derive(clap::Parser, Debug)]
#[command(name = "expfactory")]
#[command(about = "Generate experiments and infrastructure to serve them")]
#[command(version)]
pub struct Cli {
    /// Full path to a single experiment folder, or a folder with many experiments
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Subject id to embed in experiment data for a battery run
    #[arg(long)]
    pub subid: Option<String>,

    /// Comma separated list of experiments for a local battery
    #[arg(long, value_delimiter = ',')]
    pub experiments: Option<Vec<String>>,

    /// Port to preview experiment
    #[arg(long)]
    pub port: Option<u16>,

    /// Full path to local battery folder to use as template
    #[arg(long = "battery")]
    pub battery_folder: Option<PathBuf>,

    /// Maximum number of minutes for the battery, used to select experiments
    #[arg(long, default_value_t = 99999)]
    pub time: u64,

    /// Preview an experiment locally
    #[arg(long)]
    pub preview: bool,

    /// Run a single experiment/survey or battery locally
    #[arg(long)]
    pub run: bool,

    /// Survey to run for a local assessment
    #[arg(long)]
    pub survey: Option<String>,

    /// Game to run for a local assessment
    #[arg(long)]
    pub game: Option<String>,

    /// Validate an experiment folder
    #[arg(long)]
    pub validate: bool,

    /// Generate a psiturk battery instead of a local folder deployment
    #[arg(long)]
    pub psiturk: bool,

    /// Generate (and don't run) a battery with --experiments to a --folder
    #[arg(long)]
    pub generate: bool,

    /// Output folder for --generate; must not exist
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Test an experiment folder with the experiment robot
    #[arg(long)]
    pub test: bool,

    /// Validate a library entry JSON file, or every entry in a library folder
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// Use custom config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output, narrating every check
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Select the command the flags ask for
    pub fn selected_command(&self) -> Command {
        if self.preview {
            Command::Preview
        } else if self.generate {
            match &self.experiments {
                Some(experiments) => Command::Generate {
                    experiments: experiments.clone(),
                    psiturk: self.psiturk,
                },
                None => Command::MissingExperiments,
            }
        } else if self.run {
            Command::Run
        } else if self.validate {
            Command::Validate {
                folder: self.folder.clone(),
            }
        } else if let Some(path) = &self.library {
            Command::Library { path: path.clone() }
        } else if self.test {
            Command::Test
        } else {
            Command::Interface
        }
    }
}
