//! Idempotent reconciliation engine
//!
//! ```text
//! validate → resolve path → GET existing → diff → POST / DELETE / nothing
//! ```
//!
//! Every step runs in order for one resource; any error aborts the rest.

use crate::action::{ActionType, BatchReport, InvocationResult};
use crate::diff::{self, ChangePayload};
use crate::error::Result;
use crate::path::Target;
use crate::resource::Resource;
use crate::resources::Task;
use crate::state::DesiredState;
use crate::transport::FabricTransport;
use serde_json::json;

/// Reconciles resources against a controller through a [`FabricTransport`]
pub struct Reconciler<'a, T: FabricTransport + ?Sized> {
    transport: &'a T,
    check_mode: bool,
}

impl<'a, T: FabricTransport + ?Sized> Reconciler<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            check_mode: false,
        }
    }

    /// Compute and report changes without sending writes or deletes
    pub fn check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    pub async fn run(&self, task: &Task) -> Result<InvocationResult> {
        self.reconcile(task.resource.as_resource(), task.state).await
    }

    /// Bring one object to `state`
    pub async fn reconcile<R: Resource + ?Sized>(
        &self,
        resource: &R,
        state: DesiredState,
    ) -> Result<InvocationResult> {
        resource.validate()?;
        let target = Target::resolve(resource, state)?;
        let url = self.transport.url(&target.path);

        let existing = self.transport.get(&target.request_path()).await?;
        tracing::debug!(
            "{} {}: {} object(s) found",
            resource.kind(),
            url,
            existing.count()
        );

        let aci_class = resource.aci_class();
        let proposed = diff::proposed(resource);

        let (action, config) = match state {
            DesiredState::Query => (ActionType::Query, json!({})),
            DesiredState::Present => {
                let payload = ChangePayload::compute(aci_class, &proposed, &existing);
                if payload.is_empty() {
                    tracing::debug!("{} is up to date", url);
                    (ActionType::NoOp, json!({}))
                } else {
                    let action = if existing.exists() {
                        ActionType::Update
                    } else {
                        ActionType::Create
                    };
                    if self.check_mode {
                        tracing::info!("[check] would {} {}", action, url);
                    } else {
                        let body =
                            payload.to_request_body(resource.naming_attributes(), &proposed);
                        tracing::info!("{} {}", action, url);
                        self.transport.post(&target.path, &body).await?;
                    }
                    (action, payload.to_json())
                }
            }
            DesiredState::Absent => {
                if existing.exists() {
                    if self.check_mode {
                        tracing::info!("[check] would delete {}", url);
                    } else {
                        tracing::info!("delete {}", url);
                        self.transport.delete(&target.path).await?;
                    }
                    (ActionType::Delete, json!({}))
                } else {
                    tracing::debug!("{} does not exist, nothing to delete", url);
                    (ActionType::NoOp, json!({}))
                }
            }
        };

        Ok(InvocationResult {
            url,
            filter: target.filter,
            state,
            existing,
            proposed,
            config,
            changed: action.is_mutation(),
            action,
            check_mode: self.check_mode,
        })
    }

    /// Run tasks strictly in order, stopping at the first failure
    ///
    /// All tasks are resolved locally first so a bad task anywhere in the
    /// batch is reported before any request is sent; that is the only `Err`.
    /// A failure while running ends the batch but keeps the reports of the
    /// tasks before it.
    pub async fn run_all(&self, tasks: &[Task]) -> Result<BatchReport> {
        for task in tasks {
            task.resolve()?;
        }

        let mut results = Vec::with_capacity(tasks.len());
        for (index, task) in tasks.iter().enumerate() {
            tracing::debug!("Reconciling {} ({})", task.label(), task.state);
            match self.run(task).await {
                Ok(result) => results.push(result),
                Err(error) => {
                    tracing::warn!("{} failed: {}", task.label(), error);
                    return Ok(BatchReport {
                        results,
                        failure: Some((index, error)),
                    });
                }
            }
        }

        Ok(BatchReport {
            results,
            failure: None,
        })
    }
}
