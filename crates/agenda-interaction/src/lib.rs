//! LLM access and conversation orchestration.

pub mod agent;
pub mod claude_api_agent;
pub mod prompt;
pub mod responder;
pub mod session;

pub use agent::{CompletionAgent, CompletionRequest};
pub use claude_api_agent::ClaudeApiAgent;
pub use responder::{AI_DISABLED_MESSAGE, AiResponder, ResponderSettings};
pub use session::ChatSession;
