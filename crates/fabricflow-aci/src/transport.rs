//! Controller transport abstraction

use crate::error::Result;
use crate::state::ExistingState;
use async_trait::async_trait;
use serde_json::Value;

/// The three REST verbs the reconciler needs from a fabric controller
///
/// Paths are relative to the controller root (`api/...`). Implementations
/// own authentication, TLS and timeouts.
#[async_trait]
pub trait FabricTransport: Send + Sync {
    /// `{protocol}://{host}[:{port}]`, without a trailing slash
    fn base_url(&self) -> &str;

    /// Read the `imdata` list at `path`
    async fn get(&self, path: &str) -> Result<ExistingState>;

    /// Create or update from a `{class: {attributes: ...}}` document
    async fn post(&self, path: &str, body: &Value) -> Result<()>;

    /// Remove the object at `path`
    async fn delete(&self, path: &str) -> Result<()>;

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path)
    }
}
