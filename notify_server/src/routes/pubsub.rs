//! Pub/Sub push handler — decode, enrich, format, dispatch.

use axum::http::StatusCode;
use base64::Engine;

use crate::models::build::BuildPayload;
use crate::models::pubsub::PushEnvelope;
use crate::routes::NotifierState;
use crate::services::{enrich_service, slack_service};

/// Handle one push delivery end to end.
///
/// A delivery without a payload is acknowledged with no side effects so
/// Pub/Sub does not redeliver it. Everything else maps to a non-2xx status
/// and redelivery stays the runtime's problem.
pub async fn handle_push(
    state: &NotifierState,
    envelope: PushEnvelope,
) -> Result<StatusCode, StatusCode> {
    let Some(data) = envelope.data() else {
        tracing::debug!(
            subscription = envelope.subscription.as_deref().unwrap_or("unknown"),
            "Push delivery without data, ignoring"
        );
        crate::metrics::message_skipped();
        return Ok(StatusCode::NO_CONTENT);
    };

    let payload = decode_payload(data).map_err(|e| {
        tracing::error!("Failed to decode build payload: {e:#}");
        crate::metrics::dispatch_failed("decode");
        StatusCode::BAD_REQUEST
    })?;

    let build_id = payload.id.clone().unwrap_or_default();

    if let (Some(start), Some(finish)) = (payload.start_time, payload.finish_time) {
        tracing::info!(
            build_id = %build_id,
            duration_secs = (finish - start).num_seconds(),
            "Build finished"
        );
    }

    let event = enrich_service::enrich(payload, state.triggers.as_ref())
        .await
        .map_err(|e| {
            tracing::error!(build_id = %build_id, "Enrichment failed: {e:#}");
            crate::metrics::dispatch_failed("lookup");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let webhook_url = state
        .secrets
        .access_latest(&state.config.slack_webhook_secret_id)
        .await
        .map_err(|e| {
            tracing::error!(build_id = %build_id, "Secret access failed: {e:#}");
            crate::metrics::dispatch_failed("secret");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let attachment = slack_service::build_attachment(&event);
    state
        .webhook
        .send(&webhook_url, attachment)
        .await
        .map_err(|e| {
            tracing::error!(build_id = %build_id, "Slack dispatch failed: {e:#}");
            crate::metrics::dispatch_failed("webhook");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    crate::metrics::notification_sent(event.status.as_str());
    tracing::info!(
        build_id = %build_id,
        status = event.status.as_str(),
        "Build notification sent"
    );

    Ok(StatusCode::OK)
}

fn decode_payload(data: &str) -> anyhow::Result<BuildPayload> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(data)?;
    Ok(serde_json::from_slice(&bytes)?)
}
