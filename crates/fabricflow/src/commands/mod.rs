pub mod apply;
pub mod resource;
pub mod validate;

use fabricflow_aci::{ApicClient, ControllerConfig};

/// APIC にログインしてセッションを作る
pub async fn connect(config: &ControllerConfig) -> anyhow::Result<ApicClient> {
    tracing::debug!("接続先: {}", config.base_url());
    let client = ApicClient::connect(config).await?;
    Ok(client)
}
