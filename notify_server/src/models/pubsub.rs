//! Pub/Sub push envelope — the wire shape delivered to the push endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body of a Pub/Sub push delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEnvelope {
    #[serde(default)]
    pub message: Option<PubsubMessage>,
    #[serde(default)]
    pub subscription: Option<String>,
}

/// The Pub/Sub message itself. `data` carries base64-encoded JSON text and
/// is absent on administrative deliveries, which the notifier acknowledges
/// without acting on.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubsubMessage {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub publish_time: Option<DateTime<Utc>>,
}

impl PushEnvelope {
    /// The base64 payload, if this delivery carries one.
    pub fn data(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.data.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_without_message_has_no_data() {
        let envelope: PushEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.data().is_none());
    }

    #[test]
    fn envelope_with_empty_message_has_no_data() {
        let envelope: PushEnvelope =
            serde_json::from_str(r#"{"message": {"messageId": "123"}}"#).unwrap();
        assert!(envelope.data().is_none());
        assert_eq!(
            envelope.message.unwrap().message_id.as_deref(),
            Some("123")
        );
    }

    #[test]
    fn envelope_exposes_data() {
        let envelope: PushEnvelope = serde_json::from_str(
            r#"{"message": {"data": "eyJpZCI6ICJhYmMifQ=="}, "subscription": "projects/p/subscriptions/s"}"#,
        )
        .unwrap();
        assert_eq!(envelope.data(), Some("eyJpZCI6ICJhYmMifQ=="));
    }
}
