//! Build-event enrichment — joins the payload with its trigger definition.

use anyhow::Context;

use crate::models::build::{BuildPayload, BuildStatus};
use crate::models::event::BuildEvent;
use crate::services::cloudbuild_service::TriggerLookup;

/// Substitution keys Cloud Build attaches to triggered builds.
const SUB_TRIGGER_NAME: &str = "TRIGGER_NAME";
const SUB_BRANCH_NAME: &str = "BRANCH_NAME";
const SUB_COMMIT_SHA: &str = "COMMIT_SHA";
const SUB_SHORT_SHA: &str = "SHORT_SHA";
const SUB_PR_NUMBER: &str = "_PR_NUMBER";

/// Enrich a decoded payload into a [`BuildEvent`].
///
/// Fails when the payload lacks project/trigger identity or when the trigger
/// lookup fails. Missing substitution keys are not errors; the corresponding
/// event fields stay empty.
pub async fn enrich(
    payload: BuildPayload,
    triggers: &dyn TriggerLookup,
) -> anyhow::Result<BuildEvent> {
    let project_id = payload
        .project_id
        .clone()
        .context("payload has no projectId")?;
    let trigger_id = payload
        .build_trigger_id
        .clone()
        .context("payload has no buildTriggerId")?;

    let trigger = triggers.get_trigger(&project_id, &trigger_id).await?;

    let sub = |key: &str| payload.substitutions.get(key).cloned();

    Ok(BuildEvent {
        id: payload.id.clone(),
        project_id: Some(project_id),
        status: BuildStatus::parse(payload.status.as_deref().unwrap_or("UNKNOWN")),
        log_url: payload.log_url.clone(),
        trigger_name: sub(SUB_TRIGGER_NAME),
        branch: sub(SUB_BRANCH_NAME),
        commit_sha: sub(SUB_COMMIT_SHA),
        short_sha: sub(SUB_SHORT_SHA),
        pr_number: sub(SUB_PR_NUMBER),
        trigger,
    })
}
