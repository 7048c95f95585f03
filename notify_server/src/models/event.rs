//! Enriched build event — payload identity joined with trigger metadata.

use crate::models::build::BuildStatus;
use crate::models::trigger::BuildTrigger;

/// A Cloud Build status change, enriched with the trigger's GitHub linkage.
///
/// Constructed once per message by `enrich_service` and discarded after the
/// notification is dispatched. The GitHub URL accessors are pure functions of
/// the stored fields; nothing derived is cached.
#[derive(Debug, Clone)]
pub struct BuildEvent {
    pub id: Option<String>,
    pub project_id: Option<String>,
    pub status: BuildStatus,
    pub log_url: Option<String>,
    pub trigger_name: Option<String>,
    pub branch: Option<String>,
    pub commit_sha: Option<String>,
    pub short_sha: Option<String>,
    pub pr_number: Option<String>,
    pub trigger: BuildTrigger,
}

impl BuildEvent {
    /// `owner/name` slug, when the trigger is connected to GitHub.
    pub fn github_repo(&self) -> Option<String> {
        self.trigger
            .github
            .as_ref()
            .map(|gh| format!("{}/{}", gh.owner, gh.name))
    }

    pub fn github_repo_url(&self) -> Option<String> {
        self.github_repo()
            .map(|slug| format!("https://github.com/{slug}"))
    }

    pub fn github_commit_url(&self) -> Option<String> {
        self.github_repo_url()
            .zip(self.commit_sha.as_deref())
            .map(|(repo, sha)| format!("{repo}/commit/{sha}"))
    }

    pub fn github_pr_url(&self) -> Option<String> {
        self.github_repo_url()
            .zip(self.pr_number.as_deref())
            .map(|(repo, number)| format!("{repo}/pull/{number}"))
    }

    pub fn github_branch_url(&self) -> Option<String> {
        self.github_repo_url()
            .zip(self.branch.as_deref())
            .map(|(repo, branch)| format!("{repo}/tree/{branch}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trigger::GitHubSource;

    fn linked_event() -> BuildEvent {
        BuildEvent {
            id: Some("b-1".to_string()),
            project_id: Some("acme-prod".to_string()),
            status: BuildStatus::Success,
            log_url: Some("https://console.cloud.google.com/build/b-1".to_string()),
            trigger_name: Some("deploy-main".to_string()),
            branch: Some("main".to_string()),
            commit_sha: Some("abcd1234".to_string()),
            short_sha: Some("abcd123".to_string()),
            pr_number: Some("42".to_string()),
            trigger: BuildTrigger {
                id: Some("t-9".to_string()),
                name: Some("deploy-main".to_string()),
                github: Some(GitHubSource {
                    owner: "acme".to_string(),
                    name: "app".to_string(),
                }),
            },
        }
    }

    #[test]
    fn derives_repo_slug_and_urls() {
        let event = linked_event();
        assert_eq!(event.github_repo().as_deref(), Some("acme/app"));
        assert_eq!(
            event.github_repo_url().as_deref(),
            Some("https://github.com/acme/app")
        );
        assert_eq!(
            event.github_commit_url().as_deref(),
            Some("https://github.com/acme/app/commit/abcd1234")
        );
        assert_eq!(
            event.github_pr_url().as_deref(),
            Some("https://github.com/acme/app/pull/42")
        );
        assert_eq!(
            event.github_branch_url().as_deref(),
            Some("https://github.com/acme/app/tree/main")
        );
    }

    #[test]
    fn unlinked_trigger_nulls_all_derived_urls() {
        // A payload can still carry a commit SHA; without GitHub linkage the
        // derived fields stay empty regardless.
        let mut event = linked_event();
        event.trigger.github = None;
        assert!(event.github_repo().is_none());
        assert!(event.github_repo_url().is_none());
        assert!(event.github_commit_url().is_none());
        assert!(event.github_pr_url().is_none());
        assert!(event.github_branch_url().is_none());
    }

    #[test]
    fn missing_pr_number_nulls_pr_url_only() {
        let mut event = linked_event();
        event.pr_number = None;
        assert!(event.github_pr_url().is_none());
        assert!(event.github_commit_url().is_some());
        assert!(event.github_branch_url().is_some());
    }

    #[test]
    fn missing_commit_sha_nulls_commit_url() {
        let mut event = linked_event();
        event.commit_sha = None;
        assert!(event.github_commit_url().is_none());
        assert!(event.github_repo_url().is_some());
    }
}
