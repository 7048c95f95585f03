//! Notifier HTTP routes — Pub/Sub push endpoint.

pub mod pubsub;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use axum::Router;

use crate::config::NotifierConfig;
use crate::models::pubsub::PushEnvelope;
use crate::services::cloudbuild_service::TriggerLookup;
use crate::services::secret_service::SecretStore;
use crate::services::slack_service::WebhookSender;

/// Shared state for notifier route handlers. The collaborators are trait
/// objects so handler logic is testable without a live network.
#[derive(Clone)]
pub struct NotifierState {
    pub config: NotifierConfig,
    pub triggers: Arc<dyn TriggerLookup>,
    pub secrets: Arc<dyn SecretStore>,
    pub webhook: Arc<dyn WebhookSender>,
}

/// Build the notifier's Axum router.
pub fn notify_router(state: NotifierState) -> Router {
    Router::new()
        .route("/pubsub/push", post(push_handler))
        .with_state(state)
}

async fn push_handler(
    State(state): State<NotifierState>,
    Json(envelope): Json<PushEnvelope>,
) -> Result<StatusCode, StatusCode> {
    crate::metrics::message_received();

    pubsub::handle_push(&state, envelope).await
}
