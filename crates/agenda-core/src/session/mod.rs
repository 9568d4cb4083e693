//! Conversation state owned by a chat session.

pub mod history;
pub mod message;

pub use history::{ConversationHistory, GREETING, context_window};
pub use message::{ConversationTurn, MessageRole};
