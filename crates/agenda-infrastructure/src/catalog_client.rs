//! CatalogClient - HTTP client for the open-data event catalog.
//!
//! Issues one bounded GET per call:
//! `GET <catalog-url>?limit=<n>` with `Accept: application/json`, and expects
//! `{"results": [ {...}, ... ]}` back.

use std::time::Duration;

use agenda_core::config::AppConfig;
use agenda_core::event::{EventRecord, EventSource};
use agenda_core::{AgendaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::http::{classify_transport_error, map_http_error};

const SERVICE: &str = "event catalog";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the event catalog endpoint.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl CatalogClient {
    /// Creates a client for the given records endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a client from the application settings.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.catalog_url.clone()).with_timeout(config.fetch_timeout())
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send_request(&self, limit: u32) -> Result<Vec<EventRecord>> {
        tracing::debug!(url = %self.url, limit, "Fetching events from catalog");

        let response = self
            .client
            .get(&self.url)
            .query(&[("limit", limit)])
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| classify_transport_error(&err, SERVICE))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| classify_transport_error(&err, SERVICE))?;

        if !status.is_success() {
            return Err(map_http_error(status, &body));
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|err| AgendaError::shape(format!("catalog returned invalid JSON: {err}")))?;

        let records = parse_results(payload)?;
        tracing::info!(count = records.len(), "Fetched events from catalog");
        Ok(records)
    }
}

#[async_trait]
impl EventSource for CatalogClient {
    async fn fetch(&self, limit: u32) -> Result<Vec<EventRecord>> {
        self.send_request(limit).await
    }
}

/// Extracts the `results` array of a catalog response.
///
/// Array elements that are not JSON objects are skipped.
pub fn parse_results(payload: Value) -> Result<Vec<EventRecord>> {
    let Value::Object(mut root) = payload else {
        return Err(AgendaError::shape("catalog response is not a JSON object"));
    };

    let Some(Value::Array(items)) = root.remove("results") else {
        return Err(AgendaError::shape(
            "catalog response has no `results` array",
        ));
    };

    let total = items.len();
    let records: Vec<EventRecord> = items.into_iter().filter_map(EventRecord::from_value).collect();
    if records.len() < total {
        tracing::debug!(skipped = total - records.len(), "Skipped non-object catalog results");
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_results_extracts_records() {
        let records = parse_results(json!({
            "total_count": 2,
            "results": [{ "title_fr": "Concert Jazz" }, { "title_fr": "Cinéma" }]
        }))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str("title_fr"), Some("Concert Jazz"));
    }

    #[test]
    fn test_parse_results_rejects_wrong_shapes() {
        for payload in [
            json!([{ "title_fr": "Concert" }]),
            json!({ "records": [] }),
            json!({ "results": { "title_fr": "Concert" } }),
            json!("results"),
        ] {
            assert!(matches!(parse_results(payload), Err(AgendaError::Shape(_))));
        }
    }

    #[test]
    fn test_parse_results_skips_non_objects() {
        let records = parse_results(json!({ "results": [1, { "title_fr": "Expo" }, null] })).unwrap();
        assert_eq!(records.len(), 1);
    }
}
