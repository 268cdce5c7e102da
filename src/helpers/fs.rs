//! File System Utilities
//!
//! Configuration and data directory management.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "site-behaviors", "site-behaviors").ok_or_else(|| Error::NoProjectDir {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/site-behaviors/` or `$XDG_CONFIG_HOME/site-behaviors/`
/// - **macOS**: `~/Library/Application Support/org.site-behaviors.site-behaviors/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\site-behaviors\site-behaviors\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let config_dir = dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Get or create the data directory, where the headless preference file lives
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/site-behaviors/`
/// - **macOS**: `~/Library/Application Support/org.site-behaviors.site-behaviors/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\site-behaviors\site-behaviors\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    Ok(data_dir.to_path_buf())
}
