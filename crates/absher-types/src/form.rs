//! Auto-filled form data.

use serde::{Deserialize, Serialize};

/// One pre-filled form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Ordered key-value mapping produced by form auto-fill.
///
/// Field order is significant (common fields first, then service-specific
/// ones), so this is a list rather than a map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub fields: Vec<FormField>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; the display label is derived from the key.
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.fields.push(FormField {
            key: key.to_string(),
            label: field_label(key),
            value: value.into(),
        });
    }

    /// Value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// `"vehicle_plate"` -> `"Vehicle Plate"`.
pub fn field_label(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
