//! AI Responder - answers with the completion service, falls back to keyword search.

use std::sync::Arc;

use agenda_core::config::AppConfig;
use agenda_core::event::ProjectedEvent;
use agenda_core::search::keyword_answer;
use agenda_core::session::ConversationTurn;
use agenda_core::{AgendaError, Result};
use agenda_infrastructure::Settings;
use chrono::{Local, NaiveDate};

use crate::agent::{CompletionAgent, CompletionRequest};
use crate::claude_api_agent::ClaudeApiAgent;
use crate::prompt::{build_messages, system_prompt};

/// Returned when no credential is configured.
pub const AI_DISABLED_MESSAGE: &str = "ℹ️ L'assistant IA n'est pas configuré (aucune clé API). \
Utilisez la recherche par mots-clés : tapez un mot comme « concert » ou « exposition ».";

/// Generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponderSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub history_window: usize,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ResponderSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            history_window: config.history_window,
        }
    }
}

/// Answers questions about the corpus.
///
/// The completion service is an enhancement only: every failure ends in the
/// keyword search answer, never in a transport error.
#[derive(Clone)]
pub struct AiResponder {
    agent: Option<Arc<dyn CompletionAgent>>,
    settings: ResponderSettings,
    today: Option<NaiveDate>,
}

impl AiResponder {
    pub fn new(agent: Arc<dyn CompletionAgent>, settings: ResponderSettings) -> Self {
        Self {
            agent: Some(agent),
            settings,
            today: None,
        }
    }

    /// A responder without completion service.
    pub fn disabled() -> Self {
        Self {
            agent: None,
            settings: ResponderSettings::default(),
            today: None,
        }
    }

    /// Builds a Claude-backed responder when a credential is available.
    pub fn from_settings(settings: &Settings) -> Self {
        match &settings.credential {
            Some(credential) => Self::new(
                Arc::new(ClaudeApiAgent::from_config(credential, &settings.config)),
                ResponderSettings::from(&settings.config),
            ),
            None => Self::disabled(),
        }
    }

    /// Pins the date written into the system prompt.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.agent.is_some()
    }

    /// Asks the completion service, without fallback.
    ///
    /// `history` holds the turns before `query`.
    pub async fn try_respond(
        &self,
        query: &str,
        corpus: &[ProjectedEvent],
        history: &[ConversationTurn],
    ) -> Result<String> {
        let agent = self
            .agent
            .as_ref()
            .ok_or_else(|| AgendaError::config("no completion credential configured"))?;

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let request = CompletionRequest {
            system: system_prompt(today, corpus)?,
            messages: build_messages(history, self.settings.history_window, query),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        tracing::debug!(
            model = agent.model(),
            turns = request.messages.len(),
            events = corpus.len(),
            "Requesting completion"
        );
        agent.complete(&request).await
    }

    /// Answers `query`, degrading to the keyword search answer on any failure.
    pub async fn respond(
        &self,
        query: &str,
        corpus: &[ProjectedEvent],
        history: &[ConversationTurn],
    ) -> String {
        if !self.is_enabled() {
            return AI_DISABLED_MESSAGE.to_string();
        }

        match self.try_respond(query, corpus, history).await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!("AI answer failed, falling back to keyword search: {err}");
                keyword_answer(corpus, query)
            }
        }
    }
}
