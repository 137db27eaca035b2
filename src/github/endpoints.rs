// GitHub API endpoint functions.
// Typed fetches for the two resources gitpeek browses, plus the trait the store consumes.

use async_trait::async_trait;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Branch, RateLimit, Repository};

/// The slice of the GitHub API the store depends on.
///
/// `GitHubClient` is the production implementation; tests substitute fakes.
#[async_trait]
pub trait GitHubApi: Send {
    /// List public repositories of `username`.
    async fn user_repositories(&mut self, username: &str) -> Result<Vec<Repository>>;

    /// List branches of `username/repository`.
    async fn repository_branches(&mut self, username: &str, repository: &str)
    -> Result<Vec<Branch>>;

    /// Rate limit reported by the last response, if the backend tracks one.
    fn rate_limit(&self) -> Option<&RateLimit> {
        None
    }
}

impl GitHubClient {
    /// Get repositories for a user (`GET /users/{username}/repos`).
    pub async fn get_user_repos(&mut self, username: &str) -> Result<Vec<Repository>> {
        self.get_json(&["users", username, "repos"]).await
    }

    /// Get branches for a repository (`GET /repos/{owner}/{repo}/branches`).
    pub async fn get_branches(&mut self, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        self.get_json(&["repos", owner, repo, "branches"]).await
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn user_repositories(&mut self, username: &str) -> Result<Vec<Repository>> {
        self.get_user_repos(username).await
    }

    async fn repository_branches(
        &mut self,
        username: &str,
        repository: &str,
    ) -> Result<Vec<Branch>> {
        self.get_branches(username, repository).await
    }

    fn rate_limit(&self) -> Option<&RateLimit> {
        Some(GitHubClient::rate_limit(self))
    }
}
