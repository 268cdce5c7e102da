//! File-backed preference store
//!
//! A flat TOML table of string values. The file is read once on open and
//! rewritten on every change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::PreferenceStore;
use crate::error::Result;
use crate::helpers::get_or_create_data_dir;

const PREFERENCES_FILE_NAME: &str = "preferences.toml";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let value = fs::read_to_string(&path)?;
            if value.trim().is_empty() {
                BTreeMap::new()
            } else {
                toml::from_str(&value)?
            }
        } else {
            BTreeMap::new()
        };
        info!(path = ?path, entries = entries.len(), "Opened preference file");
        Ok(Self { path, entries })
    }

    /// Open the store in the platform data directory
    pub fn in_data_dir() -> Result<Self> {
        Self::open(get_or_create_data_dir()?.join(PREFERENCES_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, toml::to_string(&self.entries)?)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}
