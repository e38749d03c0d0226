//! Path helpers shared by the commands

use eyre::{Result, eyre};
use std::path::{Path, PathBuf};

/// The experiment folder to validate, defaulting to the current directory
pub fn resolve_folder(folder: Option<PathBuf>) -> Result<PathBuf> {
    let folder = match folder {
        Some(folder) => folder,
        None => std::env::current_dir()
            .map_err(|e| eyre!("Failed to read current directory: {}", e))?,
    };

    if !folder.is_dir() {
        return Err(eyre!(
            "Experiment folder '{}' not found",
            folder.display()
        ));
    }
    Ok(folder)
}

/// Surveys live side by side, so the repository is the folder's parent
pub fn survey_repo_for(folder: &Path) -> Result<PathBuf> {
    let folder = folder
        .canonicalize()
        .map_err(|e| eyre!("Failed to resolve {}: {}", folder.display(), e))?;
    folder
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| eyre!("{} has no parent folder", folder.display()))
}
