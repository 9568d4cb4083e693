//! Synthesis of a text answer from keyword search results.

use std::fmt::Write as _;

use crate::date::format_date;
use crate::event::{CanonicalField, ProjectedEvent};

pub const NO_EVENT_FOUND: &str = "🔍 Aucun événement trouvé correspondant à votre recherche";

/// Limits applied when rendering a result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerStyle {
    /// Number of events rendered in full.
    pub max_details: usize,
    /// Description length, in characters, before it is cut.
    pub description_limit: usize,
}

impl Default for AnswerStyle {
    fn default() -> Self {
        Self {
            max_details: 5,
            description_limit: 200,
        }
    }
}

/// Renders the markdown answer for `query` given the matching events.
pub fn render_answer(query: &str, found: &[ProjectedEvent], style: &AnswerStyle) -> String {
    if found.is_empty() {
        return format!("{NO_EVENT_FOUND} « {query} ».");
    }

    let mut out = String::new();
    let plural = if found.len() > 1 { "s" } else { "" };
    let _ = writeln!(
        out,
        "🎯 {} événement{plural} trouvé{plural} pour « {query} » :\n",
        found.len()
    );

    for event in found.iter().take(style.max_details) {
        render_event(&mut out, event, style);
        out.push('\n');
    }

    if found.len() > style.max_details {
        let rest = found.len() - style.max_details;
        let plural = if rest > 1 { "s" } else { "" };
        let _ = writeln!(
            out,
            "… et {rest} autre{plural} événement{plural}. Affinez votre recherche pour les voir."
        );
    }

    out.trim_end().to_string()
}

/// Renders a single event as a markdown block.
pub fn render_event(out: &mut String, event: &ProjectedEvent, style: &AnswerStyle) {
    let title = event.text(CanonicalField::Title).unwrap_or("Sans titre");
    let _ = writeln!(out, "**{title}**");

    let start = event.text(CanonicalField::StartDate);
    let end = event.text(CanonicalField::EndDate);
    match (start, end) {
        (None, None) => {}
        (Some(start), Some(end)) if start != end => {
            let _ = writeln!(out, "📅 {} ➡ {}", format_date(Some(start)), format_date(Some(end)));
        }
        (start, end) => {
            let _ = writeln!(out, "📅 {}", format_date(start.or(end)));
        }
    }

    match (event.text(CanonicalField::Location), event.text(CanonicalField::Address)) {
        (Some(place), Some(address)) => {
            let _ = writeln!(out, "📍 {place}, {address}");
        }
        (Some(place), None) => {
            let _ = writeln!(out, "📍 {place}");
        }
        (None, Some(address)) => {
            let _ = writeln!(out, "📍 {address}");
        }
        (None, None) => {}
    }

    if let Some(description) = event.text(CanonicalField::Description) {
        let description = description.trim();
        if !description.is_empty() {
            let _ = writeln!(out, "📝 {}", truncate(description, style.description_limit));
        }
    }

    if let Some(link) = event.text(CanonicalField::Link) {
        let _ = writeln!(out, "🔗 {link}");
    }
}

/// Cuts `text` to `limit` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: serde_json::Value) -> ProjectedEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_results_message() {
        let answer = render_answer("exposition", &[], &AnswerStyle::default());
        assert!(answer.starts_with(NO_EVENT_FOUND));
        assert!(answer.contains("exposition"));
    }

    #[test]
    fn test_single_result_renders_all_present_fields() {
        let found = vec![event(json!({
            "titre": "Concert Jazz",
            "date_debut": "2023-03-15T19:00:00+01:00",
            "date_fin": "2023-03-15T23:00:00+01:00",
            "lieu": "Le Bouillon",
            "adresse": "Rue de Tours, Orléans",
            "lien": "https://example.org/jazz"
        }))];

        let answer = render_answer("jazz", &found, &AnswerStyle::default());
        assert!(answer.contains("1 événement trouvé"));
        assert!(answer.contains("**Concert Jazz**"));
        assert!(answer.contains("📅 15/03/2023 à 19h00 ➡ 15/03/2023 à 23h00"));
        assert!(answer.contains("📍 Le Bouillon, Rue de Tours, Orléans"));
        assert!(answer.contains("🔗 https://example.org/jazz"));
        assert!(!answer.contains("📝"));
    }

    #[test]
    fn test_missing_title_uses_placeholder() {
        let found = vec![event(json!({ "lieu": "Orléans" }))];
        let answer = render_answer("orléans", &found, &AnswerStyle::default());
        assert!(answer.contains("**Sans titre**"));
    }

    #[test]
    fn test_only_first_results_are_detailed() {
        let found: Vec<_> = (0..8)
            .map(|i| event(json!({ "titre": format!("Concert {i}") })))
            .collect();

        let answer = render_answer("concert", &found, &AnswerStyle::default());
        assert!(answer.contains("8 événements trouvés"));
        assert!(answer.contains("**Concert 4**"));
        assert!(!answer.contains("**Concert 5**"));
        assert!(answer.contains("… et 3 autres événements"));
    }

    #[test]
    fn test_long_description_is_truncated() {
        let description = "é".repeat(250);
        let found = vec![event(json!({ "titre": "Long", "description": description }))];

        let answer = render_answer("long", &found, &AnswerStyle::default());
        let expected = format!("📝 {}...", "é".repeat(200));
        assert!(answer.contains(&expected));
        assert!(!answer.contains(&"é".repeat(201)));
    }

    #[test]
    fn test_truncate_short_text_is_untouched() {
        assert_eq!(truncate("court", 200), "court");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
