// Cache-aside store over the GitHub API.
// Owns the user and repository maps, commits successful fetches, and persists after every change.

use tracing::{debug, info, warn};

use crate::cache::{Snapshot, SnapshotStore, repo_key};
use crate::error::{GitPeekError, Result};
use crate::github::{Branch, GitHubApi, Repository};

/// Single source of truth for fetched GitHub data.
///
/// Reads never touch the network. Fetches always do, and on success overwrite
/// the whole entry for their key before persisting the new snapshot. A failed
/// fetch leaves the cache exactly as it was.
///
/// Callers decide whether to fetch by checking `is_user_cached` /
/// `is_repository_cached` first, or use the `ensure_*` shortcuts.
pub struct Store<A, P> {
    api: A,
    persistence: P,
    cache: Snapshot,
}

impl<A: GitHubApi, P: SnapshotStore> Store<A, P> {
    /// Create a store seeded from whatever `persistence` has saved.
    pub fn new(api: A, persistence: P) -> Self {
        let cache = persistence.load();
        Self {
            api,
            persistence,
            cache,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    /// Current cache contents.
    pub fn snapshot(&self) -> &Snapshot {
        &self.cache
    }

    pub fn is_user_cached(&self, username: &str) -> bool {
        self.cache.users.contains_key(username)
    }

    /// Cached repositories for `username`, empty if never fetched.
    pub fn repositories(&self, username: &str) -> &[Repository] {
        self.cache
            .users
            .get(username)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_repository_cached(&self, username: &str, repository: &str) -> bool {
        self.cache
            .repositories
            .contains_key(&repo_key(username, repository))
    }

    /// Cached branches for `username/repository`, empty if never fetched.
    pub fn branches(&self, username: &str, repository: &str) -> &[Branch] {
        self.cache
            .repositories
            .get(&repo_key(username, repository))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Fetch `username`'s repositories and replace the cached entry.
    pub async fn fetch_user_repositories(&mut self, username: &str) -> Result<&[Repository]> {
        validate_segment("username", username)?;
        debug!(username, "fetching repositories");

        let repositories = match self.api.user_repositories(username).await {
            Ok(repositories) => repositories,
            Err(e) => {
                warn!(username, error = %e, "repository fetch failed");
                return Err(e);
            }
        };

        info!(username, count = repositories.len(), "cached repositories");
        self.cache.users.insert(username.to_string(), repositories);
        self.persist();

        Ok(self.repositories(username))
    }

    /// Fetch branches of `username/repository` and replace the cached entry.
    pub async fn fetch_repository_branches(
        &mut self,
        username: &str,
        repository: &str,
    ) -> Result<&[Branch]> {
        validate_segment("username", username)?;
        validate_segment("repository", repository)?;
        debug!(username, repository, "fetching branches");

        let branches = match self.api.repository_branches(username, repository).await {
            Ok(branches) => branches,
            Err(e) => {
                warn!(username, repository, error = %e, "branch fetch failed");
                return Err(e);
            }
        };

        info!(username, repository, count = branches.len(), "cached branches");
        self.cache
            .repositories
            .insert(repo_key(username, repository), branches);
        self.persist();

        Ok(self.branches(username, repository))
    }

    /// Cached repositories if present, otherwise fetch them.
    pub async fn ensure_repositories(&mut self, username: &str) -> Result<&[Repository]> {
        if self.is_user_cached(username) {
            return Ok(self.repositories(username));
        }
        self.fetch_user_repositories(username).await
    }

    /// Cached branches if present, otherwise fetch them.
    pub async fn ensure_branches(&mut self, username: &str, repository: &str) -> Result<&[Branch]> {
        if self.is_repository_cached(username, repository) {
            return Ok(self.branches(username, repository));
        }
        self.fetch_repository_branches(username, repository).await
    }

    // The in-memory cache is already updated, so a failed write only costs durability.
    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.cache) {
            warn!(error = %e, "failed to persist cache snapshot");
        }
    }
}

/// Reject key segments that cannot name a GitHub user or repository.
///
/// GitHub names use ASCII letters, digits, `.`, `_` and `-`; `.` and `..`
/// are path navigation, not names.
fn validate_segment(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(GitPeekError::Other(format!("{} must not be empty", what)));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if matches!(value, "." | "..") || !value.chars().all(allowed) {
        return Err(GitPeekError::Other(format!("invalid {}: {:?}", what, value)));
    }
    Ok(())
}
