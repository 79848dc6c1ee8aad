//! APIC REST client
//!
//! Logs in once with `aaaLogin` and sends the session token as the
//! `APIC-cookie` cookie on every following request.

use crate::error::{FabricError, Result};
use crate::state::ExistingState;
use crate::transport::FabricTransport;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::COOKIE;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a fabric controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub protocol: String,
    pub validate_certs: bool,
    pub timeout_secs: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            username: DEFAULT_USERNAME.to_string(),
            password: None,
            protocol: DEFAULT_PROTOCOL.to_string(),
            validate_certs: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ControllerConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(FabricError::InvalidConfig(
                "controller host is not set".to_string(),
            ));
        }
        if self.protocol != "http" && self.protocol != "https" {
            return Err(FabricError::InvalidConfig(format!(
                "protocol must be http or https, got '{}'",
                self.protocol
            )));
        }
        if self.password.as_deref().is_none_or(str::is_empty) {
            return Err(FabricError::InvalidConfig(format!(
                "no password for user '{}'",
                self.username
            )));
        }
        Ok(())
    }

    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.protocol, self.host, port),
            None => format!("{}://{}", self.protocol, self.host),
        }
    }
}

/// Authenticated APIC session
pub struct ApicClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApicClient {
    /// Build the HTTP client and log in
    pub async fn connect(config: &ControllerConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.validate_certs)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = config.base_url();

        let url = format!("{}/api/aaaLogin.json", base_url);
        let body = json!({
            "aaaUser": {
                "attributes": {
                    "name": config.username,
                    "pwd": config.password.as_deref().unwrap_or_default(),
                }
            }
        });

        tracing::debug!("Logging in to {} as {}", base_url, config.username);
        let response = client.post(&url).json(&body).send().await?;
        let (status, document) = read_document(response).await?;

        if let Some((code, text)) = document.as_ref().and_then(apic_error) {
            return Err(FabricError::Transport(format!(
                "authentication failed (code {code}): {text}"
            )));
        }
        if !status.is_success() {
            return Err(FabricError::Transport(format!(
                "authentication failed: HTTP {status}"
            )));
        }

        let token = document
            .as_ref()
            .and_then(login_token)
            .ok_or_else(|| FabricError::Transport("login response carried no token".to_string()))?;

        tracing::info!("Connected to {}", base_url);
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn cookie(&self) -> String {
        format!("APIC-cookie={}", self.token)
    }

    /// Turn a write/delete response into `()` or a rejection
    fn check_write(
        &self,
        method: &str,
        url: &str,
        status: StatusCode,
        document: Option<Value>,
    ) -> Result<()> {
        if let Some((code, text)) = document.as_ref().and_then(apic_error) {
            return Err(FabricError::ControllerRejection { code, text });
        }
        if !status.is_success() {
            return Err(FabricError::Transport(format!(
                "{method} {url} failed: HTTP {status}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl FabricTransport for ApicClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> Result<ExistingState> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(COOKIE, self.cookie())
            .send()
            .await?;
        let (status, document) = read_document(response).await?;

        if let Some((code, text)) = document.as_ref().and_then(apic_error) {
            return Err(FabricError::Transport(format!(
                "GET {url} failed (code {code}): {text}"
            )));
        }
        if !status.is_success() {
            return Err(FabricError::Transport(format!(
                "GET {url} failed: HTTP {status}"
            )));
        }

        // A 2xx page that is not an APIC document must not read as "not found"
        let objects = document
            .as_ref()
            .and_then(|document| document.get("imdata"))
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                FabricError::Transport(format!(
                    "GET {url} returned HTTP {status} without an APIC document"
                ))
            })?;

        Ok(ExistingState::new(objects))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<()> {
        let url = self.url(path);
        tracing::debug!("POST {} {}", url, body);

        let response = self
            .client
            .post(&url)
            .header(COOKIE, self.cookie())
            .json(body)
            .send()
            .await?;
        let (status, document) = read_document(response).await?;
        self.check_write("POST", &url, status, document)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .header(COOKIE, self.cookie())
            .send()
            .await?;
        let (status, document) = read_document(response).await?;
        self.check_write("DELETE", &url, status, document)
    }
}

/// Status plus the body parsed as JSON, when it is JSON at all
async fn read_document(response: reqwest::Response) -> Result<(StatusCode, Option<Value>)> {
    let status = response.status();
    let text = response.text().await?;
    Ok((status, serde_json::from_str(&text).ok()))
}

// ============ APIC document helpers ============

/// The `imdata` list of an APIC response document
pub fn imdata(document: &Value) -> Vec<Value> {
    document
        .get("imdata")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// `(code, text)` of the first `error` entry in `imdata`
pub fn apic_error(document: &Value) -> Option<(String, String)> {
    imdata(document).iter().find_map(|entry| {
        let attributes = entry.get("error")?.get("attributes")?;
        let code = attributes
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let text = attributes
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        Some((code, text))
    })
}

/// Session token of an `aaaLogin` response
pub fn login_token(document: &Value) -> Option<String> {
    imdata(document).iter().find_map(|entry| {
        entry
            .get("aaaLogin")?
            .get("attributes")?
            .get("token")?
            .as_str()
            .map(str::to_string)
    })
}
