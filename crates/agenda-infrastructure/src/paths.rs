//! Path management for Agenda Chat configuration files.
//!
//! ```text
//! ~/.config/agenda-chat/
//! ├── config.toml    # Application configuration
//! └── secret.json    # API keys
//! ```

use std::path::PathBuf;

use agenda_core::AgendaError;

const APP_DIR: &str = "agenda-chat";

/// Locations of the configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaPaths {
    config_dir: PathBuf,
}

impl AgendaPaths {
    /// Resolves the platform configuration directory (XDG on Linux).
    pub fn new() -> Result<Self, AgendaError> {
        let base = dirs::config_dir()
            .ok_or_else(|| AgendaError::config("Could not determine configuration directory"))?;
        Ok(Self::with_config_dir(base.join(APP_DIR)))
    }

    /// Uses an explicit configuration directory (tests, `--config-dir`).
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }
}
