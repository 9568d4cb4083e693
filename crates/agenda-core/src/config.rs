//! Configuration models.
//!
//! `AppConfig` lives in `config.toml`, `SecretConfig` in `secret.json`.
//! Loading is done by the infrastructure crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CATALOG_URL: &str = "https://data.orleans-metropole.fr/api/explore/v2.1/catalog/datasets/agenda-orleans-metropole/records";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

/// Largest page the catalog is asked for.
pub const MAX_PAGE_LIMIT: u32 = 100;

pub const ENV_CATALOG_URL: &str = "AGENDA_CATALOG_URL";
pub const ENV_PAGE_LIMIT: &str = "AGENDA_PAGE_LIMIT";
pub const ENV_MODEL_NAME: &str = "CLAUDE_MODEL_NAME";
pub const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog_url: String,
    pub page_limit: u32,
    pub fetch_timeout_secs: u64,
    pub completion_timeout_secs: u64,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Number of past turns sent to the model.
    pub history_window: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            page_limit: 20,
            fetch_timeout_secs: 10,
            completion_timeout_secs: 30,
            model: DEFAULT_CLAUDE_MODEL.to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            history_window: 10,
        }
    }
}

impl AppConfig {
    /// Applies environment overrides on top of file values.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`. Unparseable values
    /// are ignored with a warning.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_CATALOG_URL).filter(|v| !v.trim().is_empty()) {
            self.catalog_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_PAGE_LIMIT) {
            match raw.trim().parse::<u32>() {
                Ok(limit) => self.page_limit = limit,
                Err(_) => tracing::warn!("Ignoring invalid {ENV_PAGE_LIMIT} value: {raw:?}"),
            }
        }

        if let Some(model) = lookup(ENV_MODEL_NAME).filter(|v| !v.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
    }

    /// Page size actually requested from the catalog, within `1..=MAX_PAGE_LIMIT`.
    pub fn effective_page_limit(&self) -> u32 {
        self.page_limit.clamp(1, MAX_PAGE_LIMIT)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }
}

/// Contents of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude: Option<ClaudeConfig>,
}

/// Claude API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// The credential used for the completion service.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    api_key: String,
    pub source: CredentialSource,
}

/// Where a credential was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    SecretFile,
    Environment,
}

impl Credential {
    /// Returns `None` for blank keys: a blank key means no credential.
    pub fn new(api_key: impl Into<String>, source: CredentialSource) -> Option<Self> {
        let api_key = api_key.into().trim().to_string();
        (!api_key.is_empty()).then_some(Self { api_key, source })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"***")
            .field("source", &self.source)
            .finish()
    }
}
