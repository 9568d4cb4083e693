//! Canonical projection of catalog records.
//!
//! The catalog uses French, suffixed field names (`title_fr`, `location_name`, ...).
//! Search, rendering and the AI context all work on the renamed subset defined
//! by [`CanonicalField`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AgendaError, Result};
use crate::event::EventRecord;

/// The fixed set of fields kept from a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    Title,
    Description,
    StartDate,
    EndDate,
    Location,
    Address,
    Link,
    Categories,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 8] = [
        CanonicalField::Title,
        CanonicalField::Description,
        CanonicalField::StartDate,
        CanonicalField::EndDate,
        CanonicalField::Location,
        CanonicalField::Address,
        CanonicalField::Link,
        CanonicalField::Categories,
    ];

    /// Field name in the catalog record.
    pub fn source_key(self) -> &'static str {
        match self {
            CanonicalField::Title => "title_fr",
            CanonicalField::Description => "description_fr",
            CanonicalField::StartDate => "firstdate_begin",
            CanonicalField::EndDate => "lastdate_end",
            CanonicalField::Location => "location_name",
            CanonicalField::Address => "location_address",
            CanonicalField::Link => "canonicalurl",
            CanonicalField::Categories => "tags_fr",
        }
    }

    /// Field name in the projection.
    pub fn projected_key(self) -> &'static str {
        match self {
            CanonicalField::Title => "titre",
            CanonicalField::Description => "description",
            CanonicalField::StartDate => "date_debut",
            CanonicalField::EndDate => "date_fin",
            CanonicalField::Location => "lieu",
            CanonicalField::Address => "adresse",
            CanonicalField::Link => "lien",
            CanonicalField::Categories => "categories",
        }
    }
}

/// An event reduced to the canonical fields found in its source record.
///
/// Every field is optional: a field absent upstream stays absent here and is
/// omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectedEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titre: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_debut: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_fin: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lieu: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adresse: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lien: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Value>,
}

impl ProjectedEvent {
    /// Projects a single record; `None` when it carries no canonical field.
    pub fn from_record(record: &EventRecord) -> Option<Self> {
        let mut event = ProjectedEvent::default();
        let mut found = false;

        for field in CanonicalField::ALL {
            if let Some(value) = record.get(field.source_key()) {
                *event.slot_mut(field) = Some(value.clone());
                found = true;
            }
        }

        found.then_some(event)
    }

    /// Raw projected value of `field`.
    pub fn get(&self, field: CanonicalField) -> Option<&Value> {
        match field {
            CanonicalField::Title => self.titre.as_ref(),
            CanonicalField::Description => self.description.as_ref(),
            CanonicalField::StartDate => self.date_debut.as_ref(),
            CanonicalField::EndDate => self.date_fin.as_ref(),
            CanonicalField::Location => self.lieu.as_ref(),
            CanonicalField::Address => self.adresse.as_ref(),
            CanonicalField::Link => self.lien.as_ref(),
            CanonicalField::Categories => self.categories.as_ref(),
        }
    }

    /// String value of `field`, if present and textual.
    pub fn text(&self, field: CanonicalField) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Every string stored under `field`.
    ///
    /// Strings yield themselves, arrays yield their string elements and any
    /// other JSON type yields nothing.
    pub fn texts(&self, field: CanonicalField) -> Vec<&str> {
        match self.get(field) {
            Some(Value::String(text)) => vec![text.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    fn slot_mut(&mut self, field: CanonicalField) -> &mut Option<Value> {
        match field {
            CanonicalField::Title => &mut self.titre,
            CanonicalField::Description => &mut self.description,
            CanonicalField::StartDate => &mut self.date_debut,
            CanonicalField::EndDate => &mut self.date_fin,
            CanonicalField::Location => &mut self.lieu,
            CanonicalField::Address => &mut self.adresse,
            CanonicalField::Link => &mut self.lien,
            CanonicalField::Categories => &mut self.categories,
        }
    }
}

/// Projects a batch of catalog records onto the canonical fields.
///
/// Records that carry none of the canonical fields are dropped. When that is
/// the case for the whole (non-empty) batch, the upstream schema has most
/// likely changed and [`AgendaError::SchemaMismatch`] is returned with the
/// field names that were actually seen.
pub fn project(records: &[EventRecord]) -> Result<Vec<ProjectedEvent>> {
    let events: Vec<ProjectedEvent> = records.iter().filter_map(ProjectedEvent::from_record).collect();

    if events.is_empty() && !records.is_empty() {
        let available: BTreeSet<&str> = records.iter().flat_map(EventRecord::field_names).collect();
        let err = AgendaError::SchemaMismatch {
            available: available.into_iter().map(str::to_string).collect(),
        };
        tracing::warn!("{err}");
        return Err(err);
    }

    let missing: Vec<&str> = CanonicalField::ALL
        .iter()
        .filter(|field| !records.iter().any(|record| record.contains(field.source_key())))
        .map(|field| field.source_key())
        .collect();
    if !missing.is_empty() && !records.is_empty() {
        tracing::debug!(missing = ?missing, "Some canonical fields are absent from every record");
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> EventRecord {
        EventRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_project_renames_present_fields_only() {
        let records = vec![record(json!({
            "title_fr": "Concert Jazz",
            "firstdate_begin": "2023-03-15T19:00:00+01:00",
            "location_name": "Le Bouillon",
            "uid": 42
        }))];

        let events = project(&records).unwrap();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.text(CanonicalField::Title), Some("Concert Jazz"));
        assert_eq!(event.text(CanonicalField::Location), Some("Le Bouillon"));
        assert!(event.description.is_none());
        assert!(event.lien.is_none());

        let serialized = serde_json::to_value(event).unwrap();
        assert_eq!(
            serialized,
            json!({
                "titre": "Concert Jazz",
                "date_debut": "2023-03-15T19:00:00+01:00",
                "lieu": "Le Bouillon"
            })
        );
    }

    #[test]
    fn test_project_reports_schema_mismatch() {
        let records = vec![record(json!({ "name": "Concert", "when": "tomorrow" }))];

        let result = project(&records);
        match result {
            Err(AgendaError::SchemaMismatch { available }) => {
                assert_eq!(available, vec!["name".to_string(), "when".to_string()]);
            }
            other => panic!("Expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_project_empty_input_is_not_a_mismatch() {
        assert!(project(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_project_keeps_upstream_order_and_drops_unusable_rows() {
        let records = vec![
            record(json!({ "title_fr": "B" })),
            record(json!({ "other": true })),
            record(json!({ "title_fr": "A" })),
        ];

        let titles: Vec<_> = project(&records)
            .unwrap()
            .iter()
            .filter_map(|e| e.text(CanonicalField::Title).map(str::to_string))
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_texts_handles_lists_and_other_types() {
        let event = ProjectedEvent {
            categories: Some(json!(["Musique", 3, "Jazz"])),
            titre: Some(json!(12)),
            ..Default::default()
        };

        assert_eq!(event.texts(CanonicalField::Categories), vec!["Musique", "Jazz"]);
        assert!(event.texts(CanonicalField::Title).is_empty());
        assert!(event.texts(CanonicalField::Location).is_empty());
    }
}
