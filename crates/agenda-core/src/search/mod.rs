//! Keyword search over the projected event corpus.
//!
//! This is the degraded mode of the chat: it needs no credential and no
//! network beyond the initial catalog fetch.

pub mod answer;
pub mod keyword;

pub use answer::{AnswerStyle, render_answer};
pub use keyword::{SEARCHED_FIELDS, matches, search};

use crate::event::ProjectedEvent;

/// Runs a keyword search and synthesizes the text answer shown to the user.
pub fn keyword_answer(corpus: &[ProjectedEvent], query: &str) -> String {
    let found = search(corpus, query);
    render_answer(query, &found, &AnswerStyle::default())
}
