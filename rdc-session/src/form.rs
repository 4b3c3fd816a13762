//! Participant metadata form state
//!
//! A partial record keyed by wire field name, populated one field at a
//! time as the participant works through the form.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Session-scoped participant metadata
#[derive(Debug, Default, Clone)]
pub struct MetadataForm {
    fields: BTreeMap<String, String>,
}

impl MetadataForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update one field; overwrites any previous value
    pub fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// A field counts as filled iff its value trims to a non-empty string
    pub fn is_filled(&self, field: &str) -> bool {
        self.get(field).is_some_and(|v| !v.trim().is_empty())
    }

    /// Serialize as the `participantData` payload (flat JSON object)
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}
