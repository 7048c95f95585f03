//! Centrix Cloud Build Notifier.
//!
//! A standalone binary that receives Cloud Build status messages through a
//! Pub/Sub push subscription, enriches them with the build trigger's GitHub
//! linkage, and posts a formatted Block Kit notification to a Slack incoming
//! webhook. The webhook URL is read from Secret Manager on every dispatch.
//!
//! One message, one notification. No state is kept between deliveries;
//! redelivery of failed messages is Pub/Sub's job (non-2xx response).

mod config;
mod metrics;
mod models;
mod routes;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tower_http::trace::TraceLayer;

use crate::services::auth_service::TokenSource;
use crate::services::cloudbuild_service::CloudBuildApi;
use crate::services::secret_service::SecretManagerApi;
use crate::services::slack_service::SlackWebhook;

#[derive(Parser)]
#[command(name = "cloudbuild-notify", about = "Cloud Build Slack notifier")]
struct Cli {
    /// Server port
    #[arg(short, long, env = "NOTIFY_PORT", default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .init();
    }

    let cli = Cli::parse();

    tracing::info!("Starting Cloud Build notifier...");

    let config = config::NotifierConfig::from_env();
    let token = TokenSource::from_env();

    let state = routes::NotifierState {
        config,
        triggers: Arc::new(CloudBuildApi::new(token.clone())),
        secrets: Arc::new(SecretManagerApi::new(token)),
        webhook: Arc::new(SlackWebhook::new()),
    };

    let app = routes::notify_router(state).layer(TraceLayer::new_for_http());

    // Initialize metrics
    metrics::init_metrics();

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    tracing::info!("Cloud Build notifier listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
