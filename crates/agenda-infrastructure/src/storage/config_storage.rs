//! `config.toml` storage.

use std::fs;
use std::path::{Path, PathBuf};

use agenda_core::Result;
use agenda_core::config::AppConfig;

/// Read-only storage for `config.toml`.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the application configuration.
    ///
    /// A missing or blank file yields `Ok(None)`; fields absent from the file
    /// take their default value.
    pub fn load(&self) -> Result<Option<AppConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
