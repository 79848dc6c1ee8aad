//! Concrete resource descriptors

pub mod epg_contract_binding;
pub mod fc_policy;

pub use epg_contract_binding::{EpgContractBinding, EpgContractBindingBuilder};
pub use fc_policy::{FcPolicy, FcPolicyBuilder};

use crate::error::Result;
use crate::path::Target;
use crate::resource::Resource;
use crate::state::DesiredState;

/// Any supported resource, as produced by the CLI or a task file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRequest {
    EpgContractBinding(EpgContractBinding),
    FcPolicy(FcPolicy),
}

impl ResourceRequest {
    pub fn as_resource(&self) -> &dyn Resource {
        match self {
            ResourceRequest::EpgContractBinding(binding) => binding,
            ResourceRequest::FcPolicy(policy) => policy,
        }
    }
}

impl From<EpgContractBinding> for ResourceRequest {
    fn from(binding: EpgContractBinding) -> Self {
        ResourceRequest::EpgContractBinding(binding)
    }
}

impl From<FcPolicy> for ResourceRequest {
    fn from(policy: FcPolicy) -> Self {
        ResourceRequest::FcPolicy(policy)
    }
}

/// One reconciliation unit: a resource and the intent for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Optional label for logs and reports
    pub name: Option<String>,
    pub resource: ResourceRequest,
    pub state: DesiredState,
}

impl Task {
    pub fn new(resource: impl Into<ResourceRequest>, state: DesiredState) -> Self {
        Self {
            name: None,
            resource: resource.into(),
            state,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Run all local checks without touching the network
    pub fn resolve(&self) -> Result<Target> {
        let resource = self.resource.as_resource();
        resource.validate()?;
        Target::resolve(resource, self.state)
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.resource.as_resource().kind().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FabricError;

    #[test]
    fn test_task_resolve_reports_missing_identifier() {
        let task = Task::new(FcPolicy::builder().build().unwrap(), DesiredState::Present);
        let err = task.resolve().unwrap_err();
        assert!(matches!(err, FabricError::MissingIdentifier { field: "fc_policy", .. }));
        assert!(err.is_local());
    }

    #[test]
    fn test_task_label() {
        let task = Task::new(FcPolicy::builder().build().unwrap(), DesiredState::Query);
        assert_eq!(task.label(), "fc-policy");
        assert_eq!(task.with_name("list policies").label(), "list policies");
    }
}
