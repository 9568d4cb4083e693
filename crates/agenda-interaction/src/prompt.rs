//! System prompt and message list construction.

use agenda_core::Result;
use agenda_core::event::ProjectedEvent;
use agenda_core::session::{ConversationTurn, context_window};
use chrono::NaiveDate;

const POLICY: &str = "\
Consignes :
- Réponds dans la langue de la question (en français par défaut).
- Appuie-toi uniquement sur les événements fournis ci-dessus.
- Si une information manque, dis-le honnêtement au lieu de l'inventer.
- Ne mentionne jamais le format des données ni leur structure.
- Sois concis : indique le titre, la date, le lieu et le lien des événements pertinents.";

/// Builds the system instruction embedding the date and the whole corpus.
pub fn system_prompt(today: NaiveDate, corpus: &[ProjectedEvent]) -> Result<String> {
    let events = serde_json::to_string_pretty(corpus)?;

    Ok(format!(
        "Tu es l'assistant de l'agenda des événements d'Orléans Métropole.\n\
         Nous sommes le {}.\n\n\
         Événements disponibles ({} au total) :\n{events}\n\n{POLICY}",
        today.format("%d/%m/%Y"),
        corpus.len(),
    ))
}

/// Builds the message list: bounded history followed by the new question.
pub fn build_messages(history: &[ConversationTurn], window: usize, query: &str) -> Vec<ConversationTurn> {
    let mut messages: Vec<ConversationTurn> = context_window(history, window).to_vec();
    messages.push(ConversationTurn::user(query));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::session::{ConversationHistory, MessageRole};
    use serde_json::json;

    #[test]
    fn test_system_prompt_embeds_date_and_events() {
        let corpus: Vec<ProjectedEvent> = vec![
            serde_json::from_value(json!({ "titre": "Concert Jazz", "lieu": "Le Bouillon" })).unwrap(),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let prompt = system_prompt(today, &corpus).unwrap();
        assert!(prompt.contains("15/03/2024"));
        assert!(prompt.contains("\"titre\": \"Concert Jazz\""));
        assert!(prompt.contains("1 au total"));
        assert!(prompt.contains("au lieu de l'inventer"));
    }

    #[test]
    fn test_build_messages_bounds_history() {
        let mut history = ConversationHistory::with_greeting();
        for i in 0..12 {
            history.push_user(format!("q{i}"));
            history.push_assistant(format!("r{i}"));
        }

        let messages = build_messages(history.turns(), 10, "nouvelle question");
        assert_eq!(messages.len(), 11);
        assert_eq!(messages[0].content, "q7");
        assert_eq!(messages[9].content, "r11");
        let last = messages.last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(last.content, "nouvelle question");
    }

    #[test]
    fn test_build_messages_without_history() {
        let messages = build_messages(ConversationHistory::with_greeting().turns(), 10, "concert");
        assert_eq!(messages, vec![ConversationTurn::user("concert")]);
    }
}
