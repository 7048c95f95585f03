//! Slack notification formatting and webhook dispatch.
//!
//! Builds a single Block Kit attachment per build event: colored rail,
//! header, build link, PR/repo/commit/branch fields, and a context footer
//! with the GCP logo and the project id.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::models::build::BuildStatus;
use crate::models::event::BuildEvent;

/// GCP logo shown in the message footer.
const GCLOUD_IMAGE_URL: &str = "https://www.gstatic.com/devrel-devsite/prod/v702c60b70d68da067f4d656556a48e4ab1cf14be10bb79e46f353f3fdfe8505d/cloud/images/favicons/onecloud/apple-icon.png";

const COLOR_DEFAULT: &str = "#A3A1A1";
const COLOR_QUEUED: &str = "#A3A1A1";
const COLOR_WORKING: &str = "#38A5FF";
const COLOR_FAILURE: &str = "#FF334C";
const COLOR_SUCCESS: &str = "#36A64F";

/// Attachment rail color for a build status. Unknown statuses use the
/// default color, never an error.
pub fn status_color(status: &BuildStatus) -> &'static str {
    match status {
        BuildStatus::Queued => COLOR_QUEUED,
        BuildStatus::Working => COLOR_WORKING,
        BuildStatus::Failure => COLOR_FAILURE,
        BuildStatus::Success => COLOR_SUCCESS,
        BuildStatus::Other(_) => COLOR_DEFAULT,
    }
}

/// One mrkdwn field: `<url|text>` when both parts are present, the bare
/// text when only the text is, `N/A` otherwise.
fn mrkdwn_field(label: &str, url: Option<String>, text: Option<&str>) -> Value {
    let body = match (url, text) {
        (Some(url), Some(text)) => format!("<{url}|{text}>"),
        (None, Some(text)) => text.to_string(),
        _ => "N/A".to_string(),
    };
    json!({ "type": "mrkdwn", "text": format!("*{label}:*\n{body}") })
}

/// Build the Block Kit attachment for a build event.
pub fn build_attachment(event: &BuildEvent) -> Value {
    let pr_text = match (event.github_pr_url(), event.pr_number.as_deref()) {
        (Some(url), Some(number)) => format!("<{url}|#{number}>"),
        _ => "N/A".to_string(),
    };

    let build_link = match (event.log_url.as_deref(), event.trigger_name.as_deref()) {
        (Some(url), Some(name)) => format!("<{url}|{name}>"),
        (Some(url), None) => url.to_string(),
        _ => "N/A".to_string(),
    };

    json!({
        "color": status_color(&event.status),
        "blocks": [
            {
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": format!("Build {}", event.status.title()),
                },
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*Build:*\n{build_link}"),
                },
            },
            {
                "type": "section",
                "fields": [
                    { "type": "mrkdwn", "text": format!("*Pull Request:*\n{pr_text}") },
                    mrkdwn_field("Repo", event.github_repo_url(), event.github_repo().as_deref()),
                    mrkdwn_field("Commit", event.github_commit_url(), event.short_sha.as_deref()),
                    mrkdwn_field("Branch", event.github_branch_url(), event.branch.as_deref()),
                ],
            },
            {
                "type": "context",
                "elements": [
                    {
                        "type": "image",
                        "image_url": GCLOUD_IMAGE_URL,
                        "alt_text": "GCP Logo",
                    },
                    {
                        "type": "plain_text",
                        "text": format!("Project: {}", event.project_id.as_deref().unwrap_or("unknown")),
                    },
                ],
            },
        ],
    })
}

/// Posts attachment payloads to a chat webhook.
#[async_trait]
pub trait WebhookSender: Send + Sync {
    async fn send(&self, webhook_url: &str, attachment: Value) -> anyhow::Result<()>;
}

/// Slack incoming-webhook client.
pub struct SlackWebhook {
    http: reqwest::Client,
}

impl SlackWebhook {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for SlackWebhook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookSender for SlackWebhook {
    async fn send(&self, webhook_url: &str, attachment: Value) -> anyhow::Result<()> {
        let body = json!({ "attachments": [attachment] });

        let resp = self.http.post(webhook_url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Slack webhook returned {status}: {text}");
        }

        Ok(())
    }
}
