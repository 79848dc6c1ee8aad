//! Reconciliation outcome types

use crate::diff::Attributes;
use crate::error::FabricError;
use crate::state::{DesiredState, ExistingState};
use serde::Serialize;
use serde_json::Value;

/// What the reconciler did (or would do in check mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Object did not exist and was posted
    Create,
    /// Object existed and differing attributes were posted
    Update,
    /// Object was deleted
    Delete,
    /// No changes needed
    NoOp,
    /// Read-only invocation
    Query,
}

impl ActionType {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ActionType::Create | ActionType::Update | ActionType::Delete
        )
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Update => write!(f, "update"),
            ActionType::Delete => write!(f, "delete"),
            ActionType::NoOp => write!(f, "no-op"),
            ActionType::Query => write!(f, "query"),
        }
    }
}

/// Report of a single reconciliation
#[derive(Debug, Clone, Serialize)]
pub struct InvocationResult {
    /// Object or class URL, without the response filter
    pub url: String,

    /// Response filter used on the read, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    pub state: DesiredState,

    /// Raw `imdata` snapshot read before any change
    pub existing: ExistingState,

    /// Declared attributes with unset ones dropped
    pub proposed: Attributes,

    /// Change payload keyed by class; `{}` when nothing differs
    pub config: Value,

    pub action: ActionType,

    /// Whether a mutation happened (or would have, in check mode)
    pub changed: bool,

    pub check_mode: bool,
}

impl InvocationResult {
    /// Whether a request was actually sent to change the controller
    pub fn applied(&self) -> bool {
        self.changed && !self.check_mode
    }
}

/// Counts over a batch of reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub no_change: usize,
    pub query: usize,
}

impl ApplySummary {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a InvocationResult>) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.action {
                ActionType::Create => summary.create += 1,
                ActionType::Update => summary.update += 1,
                ActionType::Delete => summary.delete += 1,
                ActionType::NoOp => summary.no_change += 1,
                ActionType::Query => summary.query += 1,
            }
        }
        summary
    }

    pub fn has_changes(&self) -> bool {
        self.create + self.update + self.delete > 0
    }
}

impl std::fmt::Display for ApplySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} deleted, {} unchanged, {} queried",
            self.create, self.update, self.delete, self.no_change, self.query
        )
    }
}

/// Outcome of an ordered batch that stops at the first failing task
///
/// Reports of the tasks that ran before the failure are kept: their changes
/// are already on the controller.
#[derive(Debug)]
pub struct BatchReport {
    /// Reports in task order
    pub results: Vec<InvocationResult>,
    /// Index of the task that stopped the batch, with its error
    pub failure: Option<(usize, FabricError)>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn summary(&self) -> ApplySummary {
        ApplySummary::from_results(&self.results)
    }
}
