//! Fabric reconciliation error types

use thiserror::Error;

/// Errors raised while resolving, fetching or reconciling a fabric object
#[derive(Error, Debug)]
pub enum FabricError {
    /// A hierarchical key component is missing for a present/absent intent
    #[error("Parameter '{field}' is required for state '{state}'")]
    MissingIdentifier { field: &'static str, state: String },

    /// An attribute was supplied for the wrong branch of a discriminating field
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A value outside the allowed choices
    #[error("Invalid value '{value}' for '{field}' (choose from: {allowed})")]
    InvalidParameter {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// Network, authentication or HTTP failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The controller refused a write or delete
    #[error("Controller rejected the request (code {code}): {text}")]
    ControllerRejection { code: String, text: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FabricError {
    fn from(err: reqwest::Error) -> Self {
        FabricError::Transport(err.to_string())
    }
}

impl FabricError {
    /// True when the error was raised before any request left the process
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            FabricError::MissingIdentifier { .. }
                | FabricError::ConstraintViolation(_)
                | FabricError::InvalidParameter { .. }
                | FabricError::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FabricError>;
