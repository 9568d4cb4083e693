//! Error types for Agenda Chat.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole workspace.
///
/// Transport failures (`Connection`, `Timeout`, `Http`, `Unexpected`) and data
/// failures (`Shape`, `SchemaMismatch`) are always caught at the component that
/// issued the call and turned into a degraded value plus a diagnostic. None of
/// them is fatal for a chat session.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgendaError {
    /// The remote host could not be reached.
    #[error("Connection error: unable to reach {service}")]
    Connection { service: String },

    /// The remote host did not answer within the configured timeout.
    #[error("Timeout: {service} took too long to respond")]
    Timeout { service: String },

    /// The remote host answered with a non-2xx status.
    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    /// The response body did not have the expected JSON structure.
    #[error("Unexpected response shape: {0}")]
    Shape(String),

    /// None of the canonical event fields were found in the fetched records.
    #[error("Schema mismatch: no known event field found (available: {})", available.join(", "))]
    SchemaMismatch { available: Vec<String> },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Catch-all for transport failures that fit no other variant.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AgendaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Connection error
    pub fn connection(service: impl Into<String>) -> Self {
        Self::Connection {
            service: service.into(),
        }
    }

    /// Creates a Timeout error
    pub fn timeout(service: impl Into<String>) -> Self {
        Self::Timeout {
            service: service.into(),
        }
    }

    /// Creates an Http error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a Shape error
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the user may reasonably retry the same request later.
    ///
    /// Nothing retries automatically; this only drives the wording shown to the user.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { .. } | Self::Timeout { .. } => true,
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Returns the HTTP status code, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AgendaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AgendaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AgendaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AgendaError>`.
pub type Result<T> = std::result::Result<T, AgendaError>;
