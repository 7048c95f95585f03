//! Build trigger descriptor — fetched from the Cloud Build API.

use serde::Deserialize;

/// A build trigger as returned by `GET /v1/projects/{p}/triggers/{t}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTrigger {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// GitHub linkage, present when the trigger watches a GitHub repo.
    #[serde(default)]
    pub github: Option<GitHubSource>,
}

/// The GitHub repository a trigger is connected to.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubSource {
    pub owner: String,
    pub name: String,
}
