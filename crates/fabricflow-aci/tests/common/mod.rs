use async_trait::async_trait;
use fabricflow_aci::{ExistingState, FabricError, FabricTransport, Result};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::sync::Mutex;

pub const BASE_URL: &str = "https://apic.test";

/// A request the fake fabric received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    Post(String, Value),
    Delete(String),
}

/// In-memory APIC keyed by DN
#[derive(Default)]
pub struct FakeFabric {
    objects: Mutex<BTreeMap<String, (String, Map<String, Value>)>>,
    calls: Mutex<Vec<Call>>,
    /// Writes allowed before rejecting, with the APIC error code and text
    rejection: Mutex<Option<(usize, String, String)>>,
    read_failure: Mutex<Option<String>>,
}

impl FakeFabric {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, dn: &str, aci_class: &str, attributes: Value) {
        let attributes = attributes.as_object().cloned().unwrap_or_default();
        self.objects
            .lock()
            .unwrap()
            .insert(dn.to_string(), (aci_class.to_string(), attributes));
    }

    pub fn attributes(&self, dn: &str) -> Option<Map<String, Value>> {
        self.objects.lock().unwrap().get(dn).map(|(_, a)| a.clone())
    }

    pub fn reject_writes(&self, code: &str, text: &str) {
        self.reject_writes_after(0, code, text);
    }

    /// Accept `allowed` writes, then reject every following one
    pub fn reject_writes_after(&self, allowed: usize, code: &str, text: &str) {
        *self.rejection.lock().unwrap() = Some((allowed, code.to_string(), text.to_string()));
    }

    /// Make every GET fail as a transport error
    pub fn fail_reads(&self, message: &str) {
        *self.read_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Get(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn document(aci_class: &str, attributes: &Map<String, Value>) -> Value {
        json!({ aci_class: { "attributes": attributes } })
    }

    /// Called after the current write was recorded
    fn check_rejection(&self) -> Result<()> {
        let Some((allowed, code, text)) = self.rejection.lock().unwrap().clone() else {
            return Ok(());
        };
        if self.writes().len() > allowed {
            Err(FabricError::ControllerRejection { code, text })
        } else {
            Ok(())
        }
    }
}

fn dn_of(path: &str) -> String {
    path.split('?')
        .next()
        .unwrap_or_default()
        .trim_start_matches("api/mo/")
        .trim_end_matches(".json")
        .to_string()
}

#[async_trait]
impl FabricTransport for FakeFabric {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn get(&self, path: &str) -> Result<ExistingState> {
        self.record(Call::Get(path.to_string()));
        if let Some(message) = self.read_failure.lock().unwrap().clone() {
            return Err(FabricError::Transport(message));
        }
        let objects = self.objects.lock().unwrap();

        if let Some(class) = path.strip_prefix("api/class/") {
            let class = class.trim_end_matches(".json");
            let found = objects
                .values()
                .filter(|(c, _)| c == class)
                .map(|(c, a)| Self::document(c, a))
                .collect();
            return Ok(ExistingState::new(found));
        }

        Ok(ExistingState::new(
            objects
                .get(&dn_of(path))
                .map(|(c, a)| vec![Self::document(c, a)])
                .unwrap_or_default(),
        ))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<()> {
        self.record(Call::Post(path.to_string(), body.clone()));
        self.check_rejection()?;

        let (aci_class, inner) = body
            .as_object()
            .and_then(|o| o.iter().next())
            .ok_or_else(|| FabricError::Transport("empty body".to_string()))?;
        let new_attributes = inner["attributes"].as_object().cloned().unwrap_or_default();

        let mut objects = self.objects.lock().unwrap();
        let entry = objects
            .entry(dn_of(path))
            .or_insert_with(|| (aci_class.clone(), Map::new()));
        entry.1.extend(new_attributes);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.record(Call::Delete(path.to_string()));
        self.check_rejection()?;
        self.objects.lock().unwrap().remove(&dn_of(path));
        Ok(())
    }
}
