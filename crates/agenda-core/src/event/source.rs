//! Event source trait definition.

use async_trait::async_trait;

use crate::error::{AgendaError, Result};
use crate::event::EventRecord;

/// Outcome of a fetch that never fails.
///
/// On error `records` is empty and `diagnostic` says why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFetch {
    pub records: Vec<EventRecord>,
    pub diagnostic: Option<AgendaError>,
}

/// A remote catalog of events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetches at most `limit` raw records.
    async fn fetch(&self, limit: u32) -> Result<Vec<EventRecord>>;

    /// Same as [`EventSource::fetch`], with failures folded into an empty result.
    async fn fetch_or_empty(&self, limit: u32) -> CatalogFetch {
        match self.fetch(limit).await {
            Ok(records) => CatalogFetch {
                records,
                diagnostic: None,
            },
            Err(err) => {
                tracing::warn!("Event fetch failed: {err}");
                CatalogFetch {
                    records: Vec::new(),
                    diagnostic: Some(err),
                }
            }
        }
    }
}
