//! ClaudeApiAgent - Direct REST API implementation for Claude.
//!
//! Sends `POST /v1/messages` with the system prompt, the message list, a
//! token bound and a temperature, and returns the first text block.

use std::time::Duration;

use agenda_core::config::{AppConfig, Credential, DEFAULT_CLAUDE_MODEL};
use agenda_core::session::{ConversationTurn, MessageRole};
use agenda_core::{AgendaError, Result};
use agenda_infrastructure::http::{classify_transport_error, map_http_error};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::agent::{CompletionAgent, CompletionRequest};

const BASE_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const SERVICE: &str = "completion service";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Agent implementation that talks to the Claude HTTP API.
#[derive(Clone)]
pub struct ClaudeApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl ClaudeApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates an agent from the resolved credential and settings.
    pub fn from_config(credential: &Credential, config: &AppConfig) -> Self {
        let model = if config.model.trim().is_empty() {
            DEFAULT_CLAUDE_MODEL
        } else {
            config.model.as_str()
        };
        Self::new(credential.api_key(), model).with_timeout(config.completion_timeout())
    }

    /// Points the agent at another endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send_request(&self, body: &CreateMessageRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| classify_transport_error(&err, SERVICE))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|err| classify_transport_error(&err, SERVICE))?;

        if !status.is_success() {
            return Err(map_http_error(status, &body_text));
        }

        let parsed: CreateMessageResponse = serde_json::from_str(&body_text)
            .map_err(|err| AgendaError::shape(format!("Failed to parse Claude response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionAgent for ClaudeApiAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let messages = request
            .messages
            .iter()
            .map(Message::from)
            .collect::<Vec<_>>();

        let body = CreateMessageRequest {
            model: &self.model,
            system: &request.system,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %self.model,
            messages = body.messages.len(),
            "Sending completion request"
        );
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct CreateMessageRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ConversationTurn> for Message<'a> {
    fn from(turn: &'a ConversationTurn) -> Self {
        let role = match turn.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        Self {
            role,
            content: &turn.content,
        }
    }
}

#[derive(Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlockResponse>,
}

#[derive(Deserialize)]
struct ContentBlockResponse {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

fn extract_text_response(response: CreateMessageResponse) -> Result<String> {
    response
        .content
        .into_iter()
        .filter(|block| block.kind.as_deref().is_none_or(|kind| kind == "text"))
        .find_map(|block| block.text)
        .ok_or_else(|| AgendaError::shape("Claude API returned no text in the response content"))
}
