//! Colored transcript rendering.

use colored::Colorize;

use agenda_core::AgendaError;
use agenda_core::date::format_date;
use agenda_core::event::{CanonicalField, ProjectedEvent};
use agenda_interaction::session::data_unavailable_message;

/// Prints an assistant answer; `**title**` lines are shown in bold.
pub fn print_answer(answer: &str) {
    for line in answer.lines() {
        match line.strip_prefix("**").and_then(|rest| rest.strip_suffix("**")) {
            Some(title) => println!("{}", title.bright_white().bold()),
            None => println!("{}", line.bright_blue()),
        }
    }
    println!();
}

/// Prints the fetched corpus, one compact block per event.
pub fn print_events(events: &[ProjectedEvent], diagnostic: Option<&AgendaError>) {
    if events.is_empty() {
        println!("{}", data_unavailable_message(diagnostic).yellow());
        return;
    }

    println!("{}", format!("📋 {} événements chargés", events.len()).bright_magenta());
    println!();

    for event in events {
        let title = event.text(CanonicalField::Title).unwrap_or("Sans titre");
        println!("{}", format!("- {title}").bright_white().bold());
        println!(
            "  📅 {}",
            format_date(event.text(CanonicalField::StartDate))
        );
        if let Some(place) = event.text(CanonicalField::Location) {
            println!("  📍 {place}");
        }
        if let Some(link) = event.text(CanonicalField::Link) {
            println!("  {}", format!("🔗 {link}").bright_black());
        }
    }
    println!();
}
