use serde::{Deserialize, Serialize};

use crate::session::{ConversationTurn, MessageRole};

/// Assistant turn that opens every session.
pub const GREETING: &str = "👋 Bonjour ! Je connais l'agenda des événements d'Orléans Métropole. \
Posez-moi une question, par exemple : « Quels concerts sont prévus ? »";

/// Append-only transcript of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history seeded with the greeting turn.
    pub fn with_greeting() -> Self {
        Self {
            turns: vec![ConversationTurn::assistant(GREETING)],
        }
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ConversationTurn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(ConversationTurn::assistant(content));
    }

    /// Drops every turn and re-seeds the greeting.
    pub fn reset(&mut self) {
        *self = Self::with_greeting();
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the last `n` turns suitable as model context.
    ///
    /// Leading assistant turns are skipped so the context opens with a user turn.
    pub fn context_window(&self, n: usize) -> &[ConversationTurn] {
        context_window(&self.turns, n)
    }
}

/// Last `n` turns of `turns`, without leading assistant turns.
pub fn context_window(turns: &[ConversationTurn], n: usize) -> &[ConversationTurn] {
    let window = &turns[turns.len().saturating_sub(n)..];
    let first_user = window
        .iter()
        .position(|turn| turn.role == MessageRole::User)
        .unwrap_or(window.len());
    &window[first_user..]
}

impl From<Vec<ConversationTurn>> for ConversationHistory {
    fn from(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(n: usize) -> ConversationHistory {
        let mut history = ConversationHistory::with_greeting();
        for i in 0..n {
            history.push_user(format!("question {i}"));
            history.push_assistant(format!("réponse {i}"));
        }
        history
    }

    #[test]
    fn test_with_greeting_starts_with_assistant_turn() {
        let history = ConversationHistory::with_greeting();
        assert_eq!(history.len(), 1);
        assert_eq!(history.turns()[0].role, MessageRole::Assistant);
        assert_eq!(history.turns()[0].content, GREETING);
    }

    #[test]
    fn test_context_window_keeps_most_recent_turns_in_order() {
        let history = history_of(8);
        let window = history.context_window(10);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].content, "question 3");
        assert_eq!(window[9].content, "réponse 7");
    }

    #[test]
    fn test_context_window_drops_assistant_turn_cut_at_boundary() {
        let history = history_of(8);
        let window = history.context_window(9);
        assert_eq!(window.len(), 8);
        assert_eq!(window[0].content, "question 4");
    }

    #[test]
    fn test_context_window_skips_leading_greeting() {
        let history = history_of(1);
        let context = history.context_window(10);
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, MessageRole::User);

        assert!(ConversationHistory::with_greeting().context_window(10).is_empty());
    }

    #[test]
    fn test_reset_returns_to_greeting() {
        let mut history = history_of(3);
        history.reset();
        assert_eq!(history, ConversationHistory::with_greeting());
    }
}
