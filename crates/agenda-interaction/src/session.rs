//! ChatSession - turn-taking over one user session.
//!
//! Owns the session state explicitly: the event corpus, fetched and projected
//! at most once, and the conversation history. Every query resolves to a
//! textual answer.

use std::sync::Arc;

use agenda_core::AgendaError;
use agenda_core::event::{EventSource, ProjectedEvent, project};
use agenda_core::search::keyword_answer;
use agenda_core::session::ConversationHistory;
use tracing::Instrument;
use uuid::Uuid;

use crate::responder::AiResponder;

pub const EMPTY_QUERY_MESSAGE: &str = "✏️ Posez une question ou tapez un mot-clé, par exemple « concert ».";

/// One conversation with its own corpus and history.
pub struct ChatSession {
    id: Uuid,
    source: Arc<dyn EventSource>,
    page_limit: u32,
    responder: AiResponder,
    /// `None` until the first fetch attempt.
    corpus: Option<Vec<ProjectedEvent>>,
    diagnostic: Option<AgendaError>,
    history: ConversationHistory,
}

impl ChatSession {
    /// Starts a session; history is seeded with the greeting turn.
    pub fn new(source: Arc<dyn EventSource>, responder: AiResponder, page_limit: u32) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, page_limit, ai = responder.is_enabled(), "Chat session started");

        Self {
            id,
            source,
            page_limit,
            responder,
            corpus: None,
            diagnostic: None,
            history: ConversationHistory::with_greeting(),
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn ai_enabled(&self) -> bool {
        self.responder.is_enabled()
    }

    /// Why the corpus is empty, if loading failed.
    pub fn diagnostic(&self) -> Option<&AgendaError> {
        self.diagnostic.as_ref()
    }

    /// Returns the session corpus, fetching it on first use.
    ///
    /// A failed fetch is not retried within the session.
    pub async fn corpus(&mut self) -> &[ProjectedEvent] {
        let span = tracing::info_span!("session", id = %self.id);
        self.ensure_corpus().instrument(span).await;
        self.corpus.as_deref().unwrap_or_default()
    }

    async fn ensure_corpus(&mut self) {
        if self.corpus.is_none() {
            let events = self.load_corpus().await;
            self.corpus = Some(events);
        }
    }

    async fn load_corpus(&mut self) -> Vec<ProjectedEvent> {
        let outcome = self.source.fetch_or_empty(self.page_limit).await;
        if let Some(err) = outcome.diagnostic {
            self.diagnostic = Some(err);
            return Vec::new();
        }

        match project(&outcome.records) {
            Ok(events) => {
                tracing::info!(count = events.len(), "Event corpus loaded");
                events
            }
            Err(err) => {
                self.diagnostic = Some(err);
                Vec::new()
            }
        }
    }

    /// Handles one user query and returns the assistant answer.
    ///
    /// Both the question and the answer are appended to the history.
    pub async fn ask(&mut self, query: &str) -> String {
        let span = tracing::info_span!("session", id = %self.id);
        self.answer(query).instrument(span).await
    }

    async fn answer(&mut self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return EMPTY_QUERY_MESSAGE.to_string();
        }

        self.history.push_user(query);
        self.ensure_corpus().await;

        let corpus = self.corpus.as_deref().unwrap_or_default();
        let answer = if corpus.is_empty() {
            data_unavailable_message(self.diagnostic.as_ref())
        } else if self.responder.is_enabled() {
            let turns = self.history.turns();
            let prior = &turns[..turns.len() - 1];
            self.responder.respond(query, corpus, prior).await
        } else {
            keyword_answer(corpus, query)
        };

        self.history.push_assistant(answer.clone());
        answer
    }

    /// Resets the conversation to the greeting; the corpus is kept.
    pub fn clear(&mut self) {
        tracing::debug!(session = %self.id, "Conversation cleared");
        self.history.reset();
    }
}

/// Answer given when the corpus is empty, with the load failure if any.
pub fn data_unavailable_message(diagnostic: Option<&AgendaError>) -> String {
    let Some(err) = diagnostic else {
        return "🚫 Aucune donnée disponible ou requête invalide.".to_string();
    };

    match err {
        AgendaError::SchemaMismatch { available } => format!(
            "⚠️ Le format de l'agenda a changé : aucun champ d'événement reconnu.\n\
             Champs disponibles : {}",
            available.join(", ")
        ),
        _ if err.is_retryable() => format!(
            "🚫 Aucune donnée disponible pour le moment ({err}). Réessayez plus tard."
        ),
        _ => format!("🚫 Aucune donnée disponible ou requête invalide ({err})."),
    }
}
