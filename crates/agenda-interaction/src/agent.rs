//! Completion agent abstraction.

use agenda_core::Result;
use agenda_core::session::ConversationTurn;
use async_trait::async_trait;

/// One request to a chat-completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    /// Oldest first; the last turn is the user's question.
    pub messages: Vec<ConversationTurn>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A remote language model able to answer a conversation.
#[async_trait]
pub trait CompletionAgent: Send + Sync {
    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Returns the first text block generated for `request`.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
