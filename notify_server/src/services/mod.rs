//! Notifier services — auth, trigger lookup, enrichment, secrets, Slack.

pub mod auth_service;
pub mod cloudbuild_service;
pub mod enrich_service;
pub mod secret_service;
pub mod slack_service;
