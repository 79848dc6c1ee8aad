//! Desired-vs-existing attribute diff
//!
//! Only declared attributes take part in the comparison. Anything the caller
//! left unset is never sent, so the controller keeps its current value.

use crate::resource::Resource;
use crate::state::ExistingState;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Native attribute name to native value
pub type Attributes = BTreeMap<String, String>;

/// Declared attributes of `resource` with unset entries dropped
pub fn proposed<R: Resource + ?Sized>(resource: &R) -> Attributes {
    resource
        .class_config()
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
        .collect()
}

/// Minimal set of attribute changes for one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePayload {
    aci_class: String,
    changes: Attributes,
}

impl ChangePayload {
    /// Entries of `proposed` that are absent from, or differ in, `existing`
    pub fn compute(aci_class: &str, proposed: &Attributes, existing: &ExistingState) -> Self {
        let changes = match existing.attributes(aci_class) {
            None => proposed.clone(),
            Some(current) => proposed
                .iter()
                .filter(|(name, value)| {
                    current.get(name.as_str()).map(native_string).as_deref() != Some(value.as_str())
                })
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        };

        Self {
            aci_class: aci_class.to_string(),
            changes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &Attributes {
        &self.changes
    }

    /// Report form: `{}` when empty, otherwise `{class: {attributes: changes}}`
    pub fn to_json(&self) -> Value {
        if self.is_empty() {
            return json!({});
        }
        class_document(&self.aci_class, &self.changes)
    }

    /// POST body: the changes plus the naming attributes taken from `proposed`
    pub fn to_request_body(&self, naming: &[&str], proposed: &Attributes) -> Value {
        let mut attributes = self.changes.clone();
        for name in naming {
            if let Some(value) = proposed.get(*name) {
                attributes.entry(name.to_string()).or_insert_with(|| value.clone());
            }
        }
        class_document(&self.aci_class, &attributes)
    }
}

/// `{class: {attributes: {...}}}`
pub fn class_document(aci_class: &str, attributes: &Attributes) -> Value {
    let attributes: Map<String, Value> = attributes
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    json!({ aci_class: { "attributes": attributes } })
}

fn native_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
