//! Cloud Build API access — build-trigger lookup over REST.

use async_trait::async_trait;

use crate::models::trigger::BuildTrigger;
use crate::services::auth_service::TokenSource;

const CLOUDBUILD_API_BASE: &str = "https://cloudbuild.googleapis.com/v1";

/// Why a trigger lookup failed. Any lookup failure aborts the notification.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("trigger {trigger_id} not found in project {project_id}")]
    NotFound {
        project_id: String,
        trigger_id: String,
    },
    #[error("Cloud Build API denied access: {0}")]
    Denied(String),
    #[error("Cloud Build API request failed: {0}")]
    Request(String),
}

/// Looks up build triggers by (project id, trigger id).
#[async_trait]
pub trait TriggerLookup: Send + Sync {
    async fn get_trigger(
        &self,
        project_id: &str,
        trigger_id: &str,
    ) -> Result<BuildTrigger, LookupError>;
}

/// REST client for the Cloud Build API.
pub struct CloudBuildApi {
    http: reqwest::Client,
    token: TokenSource,
}

impl CloudBuildApi {
    pub fn new(token: TokenSource) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }
}

#[async_trait]
impl TriggerLookup for CloudBuildApi {
    async fn get_trigger(
        &self,
        project_id: &str,
        trigger_id: &str,
    ) -> Result<BuildTrigger, LookupError> {
        let token = self
            .token
            .fetch(&self.http)
            .await
            .map_err(|e| LookupError::Request(e.to_string()))?;

        let url = format!("{CLOUDBUILD_API_BASE}/projects/{project_id}/triggers/{trigger_id}");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| LookupError::Request(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound {
                project_id: project_id.to_string(),
                trigger_id: trigger_id.to_string(),
            });
        }
        if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::UNAUTHORIZED {
            let body = resp.text().await.unwrap_or_default();
            return Err(LookupError::Denied(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LookupError::Request(format!("HTTP {status}: {body}")));
        }

        resp.json::<BuildTrigger>()
            .await
            .map_err(|e| LookupError::Request(e.to_string()))
    }
}
