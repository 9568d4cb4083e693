//! Event records as returned by the catalog and their canonical projection.

pub mod projection;
pub mod record;
pub mod source;

pub use projection::{CanonicalField, ProjectedEvent, project};
pub use record::EventRecord;
pub use source::{CatalogFetch, EventSource};
