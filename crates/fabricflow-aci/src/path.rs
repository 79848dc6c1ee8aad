//! Resource path resolution
//!
//! Pure function of the descriptor and the desired state: no I/O.

use crate::error::{FabricError, Result};
use crate::resource::Resource;
use crate::state::DesiredState;
use serde::Serialize;

/// Whether a path addresses one object or a whole class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Object,
    Class,
}

/// A resolved controller path plus its optional response filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub scope: Scope,
    /// Path relative to the controller root, e.g. `api/mo/uni/infra/fcIfPol-x.json`
    pub path: String,
    pub filter: Option<String>,
}

impl Target {
    /// Resolve the path for `resource` under `state`
    ///
    /// A complete key always addresses the single object. An incomplete key
    /// falls back to the class listing for `query` and fails with
    /// [`FabricError::MissingIdentifier`] otherwise.
    pub fn resolve<R: Resource + ?Sized>(resource: &R, state: DesiredState) -> Result<Self> {
        let key = resource.key();
        let missing = key
            .iter()
            .find(|(_, value)| value.is_none_or(str::is_empty))
            .map(|(field, _)| *field);

        match missing {
            None => {
                let values: Vec<&str> = key.iter().filter_map(|(_, value)| *value).collect();
                Ok(Self {
                    scope: Scope::Object,
                    path: format!("api/mo/uni/{}.json", resource.relative_name(&values)),
                    filter: resource.object_filter().map(str::to_string),
                })
            }
            Some(_) if state == DesiredState::Query => Ok(Self {
                scope: Scope::Class,
                path: format!("api/class/{}.json", resource.aci_class()),
                filter: None,
            }),
            Some(field) => Err(FabricError::MissingIdentifier {
                field,
                state: state.to_string(),
            }),
        }
    }

    /// Path including the filter query string, as sent on GET
    pub fn request_path(&self) -> String {
        match &self.filter {
            Some(filter) => format!("{}?{}", self.path, filter),
            None => self.path.clone(),
        }
    }
}
