//! Layered settings resolution.
//!
//! Priority, lowest first:
//! 1. built-in defaults
//! 2. `config.toml`
//! 3. `secret.json` (`claude.model_name`)
//! 4. environment variables
//!
//! The credential comes from `secret.json` first, then `ANTHROPIC_API_KEY`.
//! No credential is a supported configuration, not an error.

use agenda_core::AgendaError;
use agenda_core::config::{AppConfig, Credential, CredentialSource, ENV_API_KEY};

use crate::paths::AgendaPaths;
use crate::storage::{ConfigStorage, SecretStorage, SecretStorageError};

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: AppConfig,
    pub credential: Option<Credential>,
    /// Problems met while loading; defaults were used instead.
    pub diagnostics: Vec<AgendaError>,
}

impl Settings {
    /// Loads settings using the process environment.
    pub fn load(paths: &AgendaPaths) -> Self {
        Self::load_with(paths, |key| std::env::var(key).ok())
    }

    /// Loads settings with an explicit environment lookup.
    pub fn load_with(paths: &AgendaPaths, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut diagnostics = Vec::new();

        let config_storage = ConfigStorage::new(paths.config_file());
        let mut config = match config_storage.load() {
            Ok(Some(config)) => config,
            Ok(None) => AppConfig::default(),
            Err(err) => {
                tracing::warn!(
                    "Ignoring {}: {err}",
                    config_storage.path().display()
                );
                diagnostics.push(err);
                AppConfig::default()
            }
        };

        let mut credential = None;
        let secret_storage = SecretStorage::with_path(paths.secret_file());
        match secret_storage.load() {
            Ok(secrets) => {
                if let Some(claude) = secrets.claude {
                    credential = Credential::new(claude.api_key, CredentialSource::SecretFile);
                    if let Some(model) = claude.model_name.filter(|m| !m.trim().is_empty()) {
                        config.model = model;
                    }
                }
            }
            Err(SecretStorageError::NotFound(path)) => {
                tracing::debug!("No secret file at {}", path.display());
            }
            Err(err) => {
                tracing::warn!("Ignoring {}: {err}", secret_storage.path().display());
                diagnostics.push(err.into());
            }
        }

        config.apply_env_overrides(&lookup);

        if credential.is_none() {
            credential = lookup(ENV_API_KEY)
                .and_then(|key| Credential::new(key, CredentialSource::Environment));
        }

        match &credential {
            Some(credential) => tracing::debug!(source = ?credential.source, "Completion credential found"),
            None => tracing::info!("No completion credential configured, AI answers disabled"),
        }

        Self {
            config,
            credential,
            diagnostics,
        }
    }
}
