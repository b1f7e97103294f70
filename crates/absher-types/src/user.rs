//! Synthetic user records.
//!
//! A [`UserRecord`] is a flat JSON object loaded from the synthetic dataset.
//! Field sets differ per service type, so the record keeps the raw mapping
//! and exposes typed getters for the fields the assistant reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::service::ServiceType;

/// Identifier fields checked (in order) when a record needs a stable user id.
const USER_ID_FIELDS: [&str; 4] = ["national_id", "residency_id", "iqama_id", "vehicle_plate"];

/// One synthetic user profile. Read-only for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    /// Wrap a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// String value of a field, if present and a string.
    ///
    /// Numeric values are not coerced; the dataset stores identifiers as strings.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// String value of a field, or `""` when absent.
    pub fn field_or_empty(&self, name: &str) -> &str {
        self.field(name).unwrap_or_default()
    }

    /// Whether the record carries the given field at all.
    pub fn has_field(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Raw field mapping.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Service type tag parsed from the `service_type` field.
    pub fn service_type(&self) -> Option<ServiceType> {
        self.field("service_type").and_then(ServiceType::from_dataset_tag)
    }

    pub fn name_en(&self) -> &str {
        self.field_or_empty("name_en")
    }

    pub fn name_ar(&self) -> &str {
        self.field_or_empty("name_ar")
    }

    /// Stable identifier used in transaction records.
    pub fn user_id(&self) -> Option<&str> {
        USER_ID_FIELDS.iter().find_map(|f| self.field(f))
    }

    /// Short identifier for selection lists: national id, else iqama id,
    /// truncated to 8 characters and suffixed with `...`.
    pub fn display_id(&self) -> String {
        let id = self
            .field("national_id")
            .or_else(|| self.field("iqama_id"))
            .unwrap_or("N/A");
        format!("{}...", truncate_chars(id, 8))
    }

    /// Masked identifier for profile cards.
    ///
    /// Iqama and national ids show their first 6 characters followed by
    /// `****`; vehicle owners show their plate unmasked.
    pub fn masked_id(&self) -> Option<(&'static str, String)> {
        if let Some(id) = self.field("iqama_id") {
            Some(("Iqama ID", format!("{}****", truncate_chars(id, 6))))
        } else if let Some(id) = self.field("national_id") {
            Some(("National ID", format!("{}****", truncate_chars(id, 6))))
        } else {
            self.field("vehicle_plate")
                .map(|plate| ("Vehicle Plate", plate.to_string()))
        }
    }

    /// Selection label: `"{name_en} (ID: {display_id})"`.
    pub fn label(&self) -> String {
        format!("{} (ID: {})", self.name_en(), self.display_id())
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
