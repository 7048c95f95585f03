//! Prometheus metrics for notifier observability.

use metrics::counter;

/// Initialize metrics exporter (Prometheus).
pub fn init_metrics() {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    if let Err(e) = builder.install() {
        tracing::warn!("Failed to install Prometheus exporter: {}", e);
    }
}

/// Record a push delivery received.
pub fn message_received() {
    counter!("notify_messages_received_total").increment(1);
}

/// Record a delivery acknowledged without a payload.
pub fn message_skipped() {
    counter!("notify_messages_skipped_total").increment(1);
}

/// Record a notification dispatched to Slack.
pub fn notification_sent(status: &str) {
    counter!("notify_notifications_sent_total", "status" => status.to_string()).increment(1);
}

/// Record a processing failure by stage.
pub fn dispatch_failed(stage: &str) {
    counter!("notify_dispatch_failures_total", "stage" => stage.to_string()).increment(1);
}
