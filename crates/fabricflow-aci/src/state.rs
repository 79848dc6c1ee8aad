//! Desired and existing state of a fabric object
//!
//! `ExistingState` is always read fresh from the controller; nothing here is
//! persisted between invocations.

use crate::error::{FabricError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle intent for a single invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesiredState {
    /// Create or update the object
    #[default]
    Present,
    /// Remove the object
    Absent,
    /// Read only
    Query,
}

impl DesiredState {
    pub const ALL: [DesiredState; 3] = [
        DesiredState::Present,
        DesiredState::Absent,
        DesiredState::Query,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DesiredState::Present => "present",
            DesiredState::Absent => "absent",
            DesiredState::Query => "query",
        }
    }
}

impl std::fmt::Display for DesiredState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DesiredState {
    type Err = FabricError;

    fn from_str(s: &str) -> Result<Self> {
        DesiredState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| FabricError::InvalidParameter {
                field: "state",
                value: s.to_string(),
                allowed: "present, absent, query".to_string(),
            })
    }
}

/// The controller's current representation of the addressed object(s)
///
/// Holds the raw `imdata` list: one entry for a single object, any number
/// for a class query, none when the object does not exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExistingState {
    objects: Vec<Value>,
}

impl ExistingState {
    pub fn new(objects: Vec<Value>) -> Self {
        Self { objects }
    }

    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn exists(&self) -> bool {
        !self.objects.is_empty()
    }

    /// Number of objects the controller returned
    pub fn count(&self) -> usize {
        self.objects.len()
    }

    /// Attributes of the first object of `aci_class`, if any
    pub fn attributes(&self, aci_class: &str) -> Option<&Map<String, Value>> {
        self.objects.iter().find_map(|object| {
            object
                .get(aci_class)?
                .get("attributes")?
                .as_object()
        })
    }
}
