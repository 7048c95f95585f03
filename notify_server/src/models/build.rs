//! Cloud Build status payload — decoded from the Pub/Sub `data` field.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Build status as reported by Cloud Build. Statuses outside the four the
/// notifier colors specially (e.g. `TIMEOUT`, `CANCELLED`) are preserved
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    Queued,
    Working,
    Failure,
    Success,
    Other(String),
}

impl BuildStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "QUEUED" => Self::Queued,
            "WORKING" => Self::Working,
            "FAILURE" => Self::Failure,
            "SUCCESS" => Self::Success,
            other => Self::Other(other.to_string()),
        }
    }

    /// The raw status string as Cloud Build reported it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "QUEUED",
            Self::Working => "WORKING",
            Self::Failure => "FAILURE",
            Self::Success => "SUCCESS",
            Self::Other(raw) => raw,
        }
    }

    /// Header form: first letter upper, rest lower (`SUCCESS` -> `Success`).
    pub fn title(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            }
            None => String::new(),
        }
    }
}

/// The JSON payload inside a Cloud Build Pub/Sub message. Every field may
/// be absent; identity fields are validated at enrichment, not here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub build_trigger_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub log_url: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finish_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub substitutions: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_round_trip() {
        for raw in ["QUEUED", "WORKING", "FAILURE", "SUCCESS"] {
            assert_eq!(BuildStatus::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = BuildStatus::parse("TIMEOUT");
        assert_eq!(status, BuildStatus::Other("TIMEOUT".to_string()));
        assert_eq!(status.as_str(), "TIMEOUT");
    }

    #[test]
    fn title_capitalizes_first_letter_only() {
        assert_eq!(BuildStatus::parse("SUCCESS").title(), "Success");
        assert_eq!(BuildStatus::parse("FAILURE").title(), "Failure");
        assert_eq!(BuildStatus::parse("TIMEOUT").title(), "Timeout");
    }

    #[test]
    fn payload_tolerates_missing_fields() {
        let payload: BuildPayload = serde_json::from_str(r#"{"id": "b-1"}"#).unwrap();
        assert_eq!(payload.id.as_deref(), Some("b-1"));
        assert!(payload.project_id.is_none());
        assert!(payload.substitutions.is_empty());
    }

    #[test]
    fn payload_decodes_substitutions() {
        let payload: BuildPayload = serde_json::from_str(
            r#"{
                "id": "b-2",
                "projectId": "acme-prod",
                "buildTriggerId": "t-9",
                "status": "SUCCESS",
                "logUrl": "https://console.cloud.google.com/build/b-2",
                "substitutions": {"BRANCH_NAME": "main", "_PR_NUMBER": "42"}
            }"#,
        )
        .unwrap();
        assert_eq!(payload.project_id.as_deref(), Some("acme-prod"));
        assert_eq!(
            payload.substitutions.get("BRANCH_NAME").map(String::as_str),
            Some("main")
        );
        assert_eq!(
            payload.substitutions.get("_PR_NUMBER").map(String::as_str),
            Some("42")
        );
    }
}
