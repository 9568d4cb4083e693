//! Shared mapping of HTTP transport failures onto [`AgendaError`].

use agenda_core::AgendaError;
use reqwest::StatusCode;
use serde_json::Value;

/// Classifies a `reqwest` failure.
///
/// Order matters: a connect timeout is reported as a timeout.
pub fn classify_transport_error(err: &reqwest::Error, service: &str) -> AgendaError {
    if err.is_timeout() {
        AgendaError::timeout(service)
    } else if err.is_connect() {
        AgendaError::connection(service)
    } else {
        AgendaError::unexpected(format!("{service} request failed: {err}"))
    }
}

/// Builds an `Http` error from a non-2xx response.
///
/// Uses the `message` (or `error.message`) field of a JSON error body when
/// there is one, the canonical reason phrase otherwise.
pub fn map_http_error(status: StatusCode, body: &str) -> AgendaError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .or_else(|| json.get("error").and_then(|err| err.get("message")))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown status".to_string());

    AgendaError::http(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_http_error_uses_json_message() {
        let err = map_http_error(
            StatusCode::BAD_REQUEST,
            r#"{"error_code": "InvalidRESTParameterError", "message": "Invalid value for limit"}"#,
        );
        assert_eq!(err, AgendaError::http(400, "Invalid value for limit"));
    }

    #[test]
    fn test_map_http_error_uses_nested_error_message() {
        let err = map_http_error(
            StatusCode::UNAUTHORIZED,
            r#"{"type": "error", "error": {"type": "authentication_error", "message": "invalid x-api-key"}}"#,
        );
        assert_eq!(err, AgendaError::http(401, "invalid x-api-key"));
    }

    #[test]
    fn test_map_http_error_falls_back_to_reason() {
        let err = map_http_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err, AgendaError::http(500, "Internal Server Error"));
    }
}
