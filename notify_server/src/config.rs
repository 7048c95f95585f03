//! Notifier configuration — loaded from environment variables.

#[derive(Clone, Debug)]
pub struct NotifierConfig {
    /// Secret Manager resource holding the Slack webhook URL
    /// (`projects/<project>/secrets/<name>`). The latest version is read
    /// on every dispatch.
    pub slack_webhook_secret_id: String,
}

impl NotifierConfig {
    pub fn from_env() -> Self {
        let slack_webhook_secret_id = std::env::var("SECRET_ID").unwrap_or_default();

        if slack_webhook_secret_id.is_empty() {
            tracing::warn!("SECRET_ID not set -- Slack dispatch will fail");
        }

        Self {
            slack_webhook_secret_id,
        }
    }
}
