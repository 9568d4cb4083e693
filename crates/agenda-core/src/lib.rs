//! Domain layer of Agenda Chat.
//!
//! Pure functions and data types: no network, no file system.

pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod search;
pub mod session;

// Re-export common error type
pub use error::{AgendaError, Result};
