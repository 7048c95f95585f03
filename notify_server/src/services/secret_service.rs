//! Secret Manager access — reads the Slack webhook URL.

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;

use crate::services::auth_service::TokenSource;

const SECRETMANAGER_API_BASE: &str = "https://secretmanager.googleapis.com/v1";

/// Reads versioned secrets by resource name.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Access the latest version of `secret_id`, decoded as UTF-8 text.
    async fn access_latest(&self, secret_id: &str) -> anyhow::Result<String>;
}

#[derive(Deserialize)]
struct AccessSecretResponse {
    payload: SecretPayload,
}

#[derive(Deserialize)]
struct SecretPayload {
    data: String,
}

/// REST client for the Secret Manager API.
pub struct SecretManagerApi {
    http: reqwest::Client,
    token: TokenSource,
}

impl SecretManagerApi {
    pub fn new(token: TokenSource) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }
}

#[async_trait]
impl SecretStore for SecretManagerApi {
    async fn access_latest(&self, secret_id: &str) -> anyhow::Result<String> {
        let token = self.token.fetch(&self.http).await?;

        // Always the latest version; rotation happens in Secret Manager.
        let url = format!("{SECRETMANAGER_API_BASE}/{secret_id}/versions/latest:access");
        let resp = self.http.get(&url).bearer_auth(&token).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("secret access failed: HTTP {status}: {body}");
        }

        let body: AccessSecretResponse = resp.json().await?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(body.payload.data)?;
        Ok(String::from_utf8(bytes)?)
    }
}
