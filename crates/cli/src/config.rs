use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use expfactory_validator::Reporter;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Reporter level: 0 quiet, 1 warnings, 2 info, 3 check narration, 4 debug
    #[serde(default = "default_level")]
    pub level: u8,
    /// Experiment folder used when --folder is not given
    #[serde(default)]
    pub folder: Option<PathBuf>,
    /// Where survey folders live, instead of the experiment folder's parent
    #[serde(default)]
    pub survey_repo: Option<PathBuf>,
}

fn default_level() -> u8 {
    Reporter::DEFAULT_LEVEL
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: default_level(),
            folder: None,
            survey_repo: None,
        }
    }
}

impl Config {
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "expfactory", "expfactory")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load `path`, or the default location. A missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(eyre!("Config file {} does not exist", path.display()));
                }
                path.to_path_buf()
            }
            None => match Self::get_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&config_path)
            .map_err(|e| eyre!("Failed to read config {}: {}", config_path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| eyre!("Invalid config {}: {}", config_path.display(), e))
    }

    /// Command line flags win over the file
    pub fn reporter(&self, cli: &Cli) -> Reporter {
        if cli.quiet {
            Reporter::quiet()
        } else if cli.verbose {
            Reporter::new(Reporter::MAX_LEVEL)
        } else {
            Reporter::new(self.level)
        }
    }
}
