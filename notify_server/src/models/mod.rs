//! Notifier data models — push envelope, build payload, enriched event.

pub mod build;
pub mod event;
pub mod pubsub;
pub mod trigger;
